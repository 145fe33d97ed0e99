use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_DEST_SUBDIR, DEFAULT_LOG_DIR, DEFAULT_SOURCE_DIR};
use crate::error::{CleanerError, Result};

/// Directories the pipeline reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
}

impl PipelineConfig {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
        }
    }

    /// Cleaned copies go to a subdirectory of the source directory
    pub fn from_source_dir(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let dest_dir = source_dir.join(DEFAULT_DEST_SUBDIR);
        Self { source_dir, dest_dir }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_source_dir(DEFAULT_SOURCE_DIR)
    }
}

/// On-disk TOML configuration, every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    pub source_dir: Option<PathBuf>,
    pub dest_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            CleanerError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ConfigFile = toml::from_str(content)?;
        Ok(config)
    }
}

/// Values supplied on the command line; they win over the config file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub source_dir: Option<PathBuf>,
    pub dest_dir: Option<PathBuf>,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Layer defaults, then the config file, then command line overrides.
    /// An unset destination follows the resolved source directory.
    pub fn resolve(file: Option<ConfigFile>, overrides: Overrides) -> Self {
        let file = file.unwrap_or_default();

        let source_dir = overrides
            .source_dir
            .or(file.paths.source_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR));

        let pipeline = match overrides.dest_dir.or(file.paths.dest_dir) {
            Some(dest_dir) => PipelineConfig::new(source_dir, dest_dir),
            None => PipelineConfig::from_source_dir(source_dir),
        };

        let log_dir = file
            .logging
            .dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Self { pipeline, log_dir }
    }
}
