#![deny(unsafe_code)]
//! Engraving-style hatching generator.
//!
//! Sweeps families of roughly parallel lines across a page. Each family gets
//! an orientation from an angle mixture and a jittered spacing; each line is
//! sampled at fixed parametric steps, pushed sideways by a grain-driven
//! wiggle, and cut into runs wherever a random gap fires or the line leaves
//! the padded page. Every run becomes one stroke plus a few faint ghost
//! copies, with width and opacity taken from the grain at its midpoint.
//!
//! The output is a lazy stream of [`StrokeCommand`](engrave_core::StrokeCommand)s;
//! rendering is left to any [`RenderSink`](engrave_core::RenderSink).

pub mod config;
pub mod family;
pub mod generator;
pub mod run;
pub mod style;

pub use config::HatchConfig;
pub use family::FamilyPlan;
pub use generator::{generate, Hatcher};
pub use run::{Run, RunBuilder};
