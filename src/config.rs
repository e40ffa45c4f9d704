// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! Configuration management

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for persistent data (catalog database, startup log)
    pub data_dir: PathBuf,
    /// Log level used when no verbosity flag is given
    pub log_level: String,
}

/// Optional `config.toml` in the platform config directory
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: directories::ProjectDirs::from("org", "hyperpolymath", "repovault")
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| {
                    std::env::current_dir()
                        .unwrap_or_else(|_| PathBuf::from("."))
                        .join(".repovault")
                }),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Resolve configuration: defaults, then `config.toml`, then the
    /// `--data-dir` / `REPOVAULT_DATA_DIR` override when given.
    #[must_use]
    pub fn load(data_dir_override: Option<PathBuf>) -> Self {
        let mut config = Self::default();
        if let Some(file) = read_config_file() {
            if let Some(dir) = file.data_dir {
                config.data_dir = dir;
            }
            if let Some(level) = file.log_level {
                config.log_level = level;
            }
        }
        if let Some(dir) = data_dir_override {
            config.data_dir = dir;
        }
        config
    }

    /// Path of the catalog database inside the data directory
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("repos.db")
    }

    /// Path of the startup error log inside the data directory
    #[must_use]
    pub fn startup_log_path(&self) -> PathBuf {
        self.data_dir.join("startup_error.log")
    }
}

fn read_config_file() -> Option<ConfigFile> {
    let path = directories::ProjectDirs::from("org", "hyperpolymath", "repovault")?
        .config_dir()
        .join("config.toml");
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!("ignoring malformed config.toml: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_defaults() {
        let config = Config::load(Some(PathBuf::from("/tmp/rv-data")));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/rv-data"));
        assert_eq!(config.db_path(), PathBuf::from("/tmp/rv-data/repos.db"));
    }
}
