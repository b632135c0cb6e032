//! Construction-time configuration errors.
//!
//! The tick and input paths never fail: invalid transitions are silent no-ops.
//! The only error category is bad configuration, caught when a ball is built.

use std::fmt;

/// Errors raised while loading or validating ball configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Tuning JSON could not be parsed.
    Parse(serde_json::Error),

    /// A tuning constant is outside its safe operating range.
    OutOfRange {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        range: &'static str,
    },

    /// A probe offset has zero length, so its ray would never leave the ball centre.
    DegenerateProbe {
        /// 1-based probe index.
        index: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "failed to parse tuning: {}", err),
            ConfigError::OutOfRange { name, value, range } => write!(
                f,
                "tuning value '{}' = {} is outside safe range {}",
                name, value, range
            ),
            ConfigError::DegenerateProbe { index } => {
                write!(f, "probe {} has a zero-length offset", index)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Convenience alias: a `Result` using `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Returns an error unless `value` is strictly positive.
pub fn require_positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` lies in `[min, max)`.
pub fn require_in_range(
    name: &'static str,
    value: f32,
    min: f32,
    max: f32,
    range: &'static str,
) -> ConfigResult<()> {
    if value >= min && value < max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value, range })
    }
}
