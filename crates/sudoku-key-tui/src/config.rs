use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use sudoku_key_core::KeyParams;
use tracing::{debug, warn};

/// How the derived key is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lowercase hex, one line
    #[default]
    Hex,
    /// The 64 key bytes as-is
    Raw,
}

/// Board color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

/// Persisted settings. Command-line flags override these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hash rounds for the puzzle digest
    pub iterations: u16,
    pub output: OutputFormat,
    pub theme: ThemeName,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: KeyParams::default().iterations,
            output: OutputFormat::default(),
            theme: ThemeName::default(),
        }
    }
}

impl Config {
    /// `<config dir>/sudoku-key/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sudoku-key").join("config.json"))
    }

    /// Load from `path`. A missing or malformed file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring malformed config");
                    Self::default()
                }
            },
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no config file, using defaults");
                Self::default()
            }
        }
    }

    /// Write to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    pub fn key_params(&self) -> KeyParams {
        KeyParams::with_iterations(self.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.iterations, 9);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"output": "raw"}"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.output, OutputFormat::Raw);
        assert_eq!(config.theme, ThemeName::Dark);
        assert_eq!(config.iterations, 9);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            iterations: 1000,
            output: OutputFormat::Raw,
            theme: ThemeName::Light,
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
        assert_eq!(config.key_params().iterations, 1000);
    }
}
