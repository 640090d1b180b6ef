//! Instance configuration loaded from TOML.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Closed range that every safe view of an instance must observe its value in.
///
/// Safe operations clamp into this range; unsafe operations may leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct Bounds {
    min: i64,
    max: i64,
}

#[derive(Serialize, Deserialize)]
struct RawBounds {
    #[serde(default)]
    min: i64,
    #[serde(default = "default_max")]
    max: i64,
}

impl Default for RawBounds {
    fn default() -> Self {
        Bounds::default().into()
    }
}

fn default_max() -> i64 {
    i64::MAX
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    bounds: RawBounds,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = Error;

    fn try_from(raw: RawBounds) -> Result<Self> {
        Bounds::new(raw.min, raw.max)
    }
}

impl From<Bounds> for RawBounds {
    fn from(bounds: Bounds) -> Self {
        Self {
            min: bounds.min,
            max: bounds.max,
        }
    }
}

impl Bounds {
    /// Create bounds, rejecting an empty range.
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }
}

/// Non-negative values only.
impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: 0,
            max: i64::MAX,
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Configuration applied to instances built with `create_with`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Invariant enforced on safe views.
    #[serde(default)]
    pub bounds: Bounds,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    ///
    /// Syntax errors come back as [`Error::Parse`]; an empty range as
    /// [`Error::InvalidBounds`].
    pub fn parse(toml: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))?;
        let bounds = Bounds::new(raw.bounds.min, raw.bounds.max)?;
        Ok(Self { bounds })
    }
}
