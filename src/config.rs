//! Runtime configuration for rtail.
//!
//! Defaults are always available. With the `config` feature a TOML file can
//! override them; keys that are absent keep their default value.
//!
//! ```toml
//! chunk_size = 65536
//! default_line_count = 20
//! max_line_count = 100000
//! max_concurrent_reads = 8
//! ```

use crate::error::{Result, RtailError};
use crate::file_handler::DEFAULT_CHUNK_SIZE;
#[cfg(feature = "config")]
use std::path::{Path, PathBuf};

/// Tunables for the tail service
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct TailConfig {
    /// Read window in bytes; bounds memory used by the reverse scan
    pub chunk_size: usize,
    /// Lines printed when the caller does not ask for a specific count
    pub default_line_count: usize,
    /// Largest line count a caller may request
    pub max_line_count: usize,
    /// Extractions allowed to run at the same time
    pub max_concurrent_reads: usize,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            default_line_count: 10,
            max_line_count: 10_000,
            max_concurrent_reads: 4,
        }
    }
}

impl TailConfig {
    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(RtailError::config("chunk_size must be greater than zero"));
        }
        if self.max_line_count == 0 {
            return Err(RtailError::config("max_line_count must be greater than zero"));
        }
        if self.default_line_count == 0 || self.default_line_count > self.max_line_count {
            return Err(RtailError::config(format!(
                "default_line_count must be between 1 and max_line_count ({}), got {}",
                self.max_line_count, self.default_line_count
            )));
        }
        if self.max_concurrent_reads == 0 {
            return Err(RtailError::config(
                "max_concurrent_reads must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    #[cfg(feature = "config")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| RtailError::config(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Location of the per-user configuration file, if the platform has one
    #[cfg(feature = "config")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rtail").join("config.toml"))
    }

    /// Load configuration from `path`, or from the per-user file if it exists
    ///
    /// An explicit path must exist. The per-user file is optional; without
    /// it the defaults are returned.
    #[cfg(feature = "config")]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => path,
                None => {
                    log::debug!("no configuration file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        log::debug!("loading configuration from {}", path.display());
        let content = std::fs::read_to_string(&path).map_err(|e| {
            RtailError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}
