//! Run configuration.
//!
//! A [`BalanceConfig`] can be loaded from a JSON file and is then overridden
//! field by field from the command line. `mode` stays a raw string until
//! [`BalanceConfig::weight_mode`] so that a bad value surfaces as
//! [`ConfigError::InvalidMode`] before any scanning starts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::corpus::{InvalidMode, ScanOptions, WeightMode, DEFAULT_DELIMITER, DEFAULT_EXTENSION};
use crate::types::policy::FailurePolicy;

pub const DEFAULT_DESTINATION: &str = "data/corpus_balanced_optimized";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidMode(#[from] InvalidMode),
    #[error("Delimiter must not be whitespace")]
    InvalidDelimiter,
}

// Serializable, comparable, explicit defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BalanceConfig {
    pub source_folder: PathBuf,
    #[serde(default = "default_destination")]
    pub destination_folder: PathBuf,
    pub capacity: i64,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_extension")]
    pub extension: Option<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub on_error: FailurePolicy,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

fn default_destination() -> PathBuf {
    PathBuf::from(DEFAULT_DESTINATION)
}

fn default_mode() -> String {
    WeightMode::default().as_str().to_string()
}

fn default_extension() -> Option<String> {
    Some(DEFAULT_EXTENSION.to_string())
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl BalanceConfig {
    pub fn new(source_folder: impl Into<PathBuf>, capacity: i64) -> Self {
        Self {
            source_folder: source_folder.into(),
            destination_folder: default_destination(),
            capacity,
            mode: default_mode(),
            extension: default_extension(),
            delimiter: default_delimiter(),
            recursive: false,
            on_error: FailurePolicy::default(),
            dry_run: false,
            report_path: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn weight_mode(&self) -> Result<WeightMode, ConfigError> {
        Ok(self.mode.parse()?)
    }

    pub fn scan_options(&self) -> Result<ScanOptions, ConfigError> {
        if self.delimiter.is_whitespace() {
            return Err(ConfigError::InvalidDelimiter);
        }
        Ok(ScanOptions {
            mode: self.weight_mode()?,
            extension: self.extension.clone(),
            delimiter: self.delimiter,
            recursive: self.recursive,
            on_unreadable: self.on_error,
        })
    }
}
