use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the course planner.
///
/// Controls how course files are split into fields and which file is loaded
/// when none is named explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The character separating fields within a row.
    delimiter: char,

    /// The course file to load when the user does not name one.
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            source: None,
        }
    }
}

/// Errors that can occur while reading or writing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access config file {path}: {source}")]
    Io {
        /// The path that was accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML, or does not describe a configuration.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The delimiter is unusable for splitting rows.
    #[error("invalid delimiter {0:?}: must not be whitespace")]
    Delimiter(char),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if the TOML content is
    /// invalid, or if the configured delimiter is whitespace.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        validate_delimiter(config.delimiter)?;
        Ok(config)
    }

    /// Loads the configuration at `path`, falling back to the defaults if the
    /// file is missing or unusable.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::debug!("Using default configuration: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized or if the
    /// file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the field delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Sets the field delimiter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Delimiter`] if the delimiter is whitespace,
    /// since fields are trimmed of whitespace after splitting.
    pub fn set_delimiter(&mut self, delimiter: char) -> Result<(), ConfigError> {
        validate_delimiter(delimiter)?;
        self.delimiter = delimiter;
        Ok(())
    }
}

fn validate_delimiter(delimiter: char) -> Result<(), ConfigError> {
    if delimiter.is_whitespace() {
        Err(ConfigError::Delimiter(delimiter))
    } else {
        Ok(())
    }
}

const fn default_delimiter() -> char {
    ','
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_delimiter")]
        delimiter: char,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<PathBuf>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { delimiter, source } => Self { delimiter, source },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            delimiter: config.delimiter,
            source: config.source,
        }
    }
}
