//! Validation errors for timer configuration values.

use thiserror::Error;

/// Errors produced when a seconds value fails validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The value is NaN or infinite.
    #[error("value must be a finite number, got {0}")]
    NotFinite(f64),

    /// The value is zero or negative.
    #[error("value must be positive, got {0}")]
    BelowMinimum(f64),

    /// The value does not fit in a `u32` second counter.
    #[error("value is too large: {0}")]
    TooLarge(f64),

    /// A configuration field holds zero.
    #[error("{0} must be at least 1 second")]
    ZeroField(&'static str),
}

impl ConfigError {
    /// Returns true if the rejected value was NaN or infinite.
    #[must_use]
    pub fn is_not_finite(&self) -> bool {
        matches!(self, Self::NotFinite(_))
    }

    /// Returns true if the rejected value was below one second.
    #[must_use]
    pub fn is_below_minimum(&self) -> bool {
        matches!(self, Self::BelowMinimum(_) | Self::ZeroField(_))
    }
}
