//! Watch path configuration.
//!
//! Both directories default to `input/` and `output/` relative to the
//! working directory and must exist before the watcher starts; a missing
//! directory is a setup-time error, not a per-file one.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Input directory does not exist: {0}")]
    InputDirMissing(PathBuf),

    #[error("Output directory does not exist: {0}")]
    OutputDirMissing(PathBuf),
}

/// Configuration for a watch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Directory polled for new audio files.
    pub input_dir: PathBuf,

    /// Directory normalized transcripts are written to.
    pub output_dir: PathBuf,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl WatchConfig {
    /// Check that both directories exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input_dir.is_dir() {
            return Err(ConfigError::InputDirMissing(self.input_dir.clone()));
        }
        if !self.output_dir.is_dir() {
            return Err(ConfigError::OutputDirMissing(self.output_dir.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_paths_are_cwd_relative() {
        let config = WatchConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn validate_requires_both_directories() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        let output = temp.path().join("out");

        let config = WatchConfig {
            input_dir: input.clone(),
            output_dir: output.clone(),
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InputDirMissing(_))
        ));

        std::fs::create_dir(&input).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutputDirMissing(_))
        ));

        std::fs::create_dir(&output).unwrap();
        assert!(config.validate().is_ok());
    }
}
