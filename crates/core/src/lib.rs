#![deny(unsafe_code)]
//! Core types for the engrave hatching generator.
//!
//! Provides the `Xorshift64` PRNG, hash-based value noise and its fractal sum
//! (`GrainField`), the `AngleMixture` orientation sampler, the `Srgb` color
//! type, `StrokeCommand`/`StrokeStyle`, the `RenderSink` drawing-surface
//! trait, parameter helpers, and the reproducible `Recipe` record.

pub mod color;
pub mod error;
pub mod mixture;
pub mod noise;
pub mod params;
pub mod prng;
pub mod recipe;
pub mod sink;
pub mod stroke;

pub use color::Srgb;
pub use error::EngraveError;
pub use mixture::{AngleMixture, AngleMode};
pub use noise::{FbmParams, GrainField, ScalarField};
pub use prng::Xorshift64;
pub use recipe::Recipe;
pub use sink::{draw, render_page, replay, RenderSink, StrokeStats};
pub use stroke::{LineCap, LineJoin, StrokeCommand, StrokeKind, StrokeStyle};
