use std::{io, path::PathBuf};

use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors that can occur while reading, querying, or writing configuration data.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config at {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be written.
    #[error("failed to write config at {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The text is not a valid TOML table.
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    /// The table could not be rendered as TOML.
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),

    /// A required key is absent.
    #[error("missing config key: {key}")]
    Missing { key: String },

    /// A key is present but its value has the wrong type.
    #[error("invalid value for config key: {key}")]
    Invalid {
        key: String,
        #[source]
        source: toml::de::Error,
    },

    /// A value has the right type but violates a numeric constraint.
    #[error("constraint violated by config key: {key}")]
    Constraint {
        key: String,
        #[source]
        source: ConstraintError,
    },

    /// A `[min, max]` pair is not a finite, ordered interval.
    #[error("invalid bounds for config key {key}: [{min}, {max}]")]
    InvalidBounds { key: String, min: f64, max: f64 },

    /// A sweep range cannot produce any values.
    #[error("invalid sweep: start={start}, stop={stop}, step={step}")]
    InvalidSweep { start: f64, stop: f64, step: f64 },
}
