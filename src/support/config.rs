//! Typed key/value configuration backed by a TOML table.
//!
//! Every run of a state solver reads its parameters from a [`ConfigData`]:
//! tolerances, search domains, initial values, and the physical parameters
//! the spectra need. Values are looked up by key and deserialized into the
//! requested type with `serde`.
//!
//! ```
//! use meanfield::support::config::ConfigData;
//!
//! let mut config = ConfigData::from_toml_str("t = 0.1\ngrid_len = 64").unwrap();
//! assert_eq!(config.get::<usize>("grid_len").unwrap(), 64);
//! assert_eq!(config.get_or("tol_d1", 1e-6).unwrap(), 1e-6);
//!
//! config.set("x", 0.12);
//! assert!(config.to_toml_string().unwrap().contains("x = 0.12"));
//! ```

mod error;
mod sweep;

pub use error::ConfigError;
pub use sweep::MAX_SWEEP_POINTS;

use std::{fs, path::Path};

use serde::de::DeserializeOwned;
use toml::{Table, Value};

/// A flat set of named configuration values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigData {
    values: Table,
}

impl ConfigData {
    /// Creates an empty config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing TOML table.
    #[must_use]
    pub fn from_table(values: Table) -> Self {
        Self { values }
    }

    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid TOML table.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            values: toml::from_str(text)?,
        })
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&text)?;
        tracing::debug!(?path, keys = config.values.len(), "loaded config");
        Ok(config)
    }

    /// Returns the value stored under `key`, converted to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if the key is absent, or
    /// [`ConfigError::Invalid`] if its value cannot be converted to `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self.values.get(key).ok_or_else(|| ConfigError::Missing {
            key: key.to_owned(),
        })?;

        value
            .clone()
            .try_into()
            .map_err(|source| ConfigError::Invalid {
                key: key.to_owned(),
                source,
            })
    }

    /// Returns the value stored under `key`, or `default` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the key is present but its value
    /// cannot be converted to `T`.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            Err(ConfigError::Missing { .. }) => Ok(default),
            other => other,
        }
    }

    /// Returns true if `key` has a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Iterates over the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Renders the config as TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if the table cannot be rendered.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(&self.values)?)
    }

    /// Writes the config to `path` as TOML, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if the table cannot be rendered, or
    /// [`ConfigError::Write`] if the file cannot be written.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;

        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(?path, "wrote config");
        Ok(())
    }
}
