//! Error types for the engrave core.

use thiserror::Error;

/// Errors produced while configuring or rendering a hatching run.
///
/// Generation itself is total: every variant here is raised either while a
/// configuration is validated (before the first stroke) or by a drawing surface.
#[derive(Debug, Error)]
pub enum EngraveError {
    /// Page width or height was zero, negative, or not finite.
    #[error("invalid dimensions: width and height must be positive and finite")]
    InvalidDimensions,

    /// A configuration value was outside its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An angle mixture was constructed with no modes.
    #[error("angle mixture must contain at least one mode")]
    EmptyMixture,

    /// One mode of an angle mixture was unusable.
    #[error("invalid angle mode {index}: {reason}")]
    InvalidMode { index: usize, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A drawing surface failed to write its output.
    #[error("I/O error: {0}")]
    Io(String),
}
