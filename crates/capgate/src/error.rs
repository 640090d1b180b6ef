//! Capability gate error types.

use crate::Bounds;
use thiserror::Error;

/// Capability gate errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A reversible gate refused to hand out a safe view because the
    /// instance no longer satisfies the safe invariant.
    #[error("instance not in a safe-representable state: value {value} outside {bounds}")]
    NotSafeRepresentable { value: i64, bounds: Bounds },

    /// The configured bounds are empty.
    #[error("invalid bounds: min {min} exceeds max {max}")]
    InvalidBounds { min: i64, max: i64 },

    /// Failed to parse a configuration file.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// An I/O error occurred while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
