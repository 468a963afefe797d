use crate::journal::Journal;
use crate::utils::expand_tilde;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub journal: JournalConfig,
    #[serde(default)]
    pub discover: DiscoverConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JournalConfig {
    /// Journal file; platform data directory when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverConfig {
    /// Restaurant catalog (JSON array) used by `discover`
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Number of recommendations shown (0 = all)
    #[serde(default = "default_discover_limit")]
    pub limit: usize,
}

fn default_discover_limit() -> usize {
    10
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            limit: default_discover_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the path to the configuration file (`GOURMETLOG_CONFIG` overrides).
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("GOURMETLOG_CONFIG") {
            return PathBuf::from(path);
        }

        directories::ProjectDirs::from("com", "gourmetlog", "gourmetlog")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Load config from file, creating default if missing.
    ///
    /// A file that fails to parse is left untouched and defaults are used.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let data = fs::read_to_string(path)?;
            match toml::from_str::<Config>(&data) {
                Ok(config) => Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config at {}: {}",
                        path.display(),
                        e
                    );
                    eprintln!("Using default configuration; the file was left unchanged.");
                    Ok(Config::default())
                }
            }
        } else {
            // Create default config.
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save config to file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)?;

        Ok(())
    }

    /// Journal location, expanding ~ if needed.
    pub fn journal_path(&self) -> PathBuf {
        self.journal
            .path
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(Journal::default_path)
    }

    /// Catalog location, expanding ~ if needed.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.discover.catalog.as_deref().map(expand_tilde)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.discover.limit, 10);
        assert_eq!(config.log.level, "warn");
        assert_eq!(config.journal_path(), Journal::default_path());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[journal]\npath = \"/data/food.json\"\n\n[discover]\ncatalog = \"/data/catalog.json\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.journal_path(), PathBuf::from("/data/food.json"));
        assert_eq!(
            config.catalog_path(),
            Some(PathBuf::from("/data/catalog.json"))
        );
        assert_eq!(config.discover.limit, 10);
    }

    #[test]
    fn test_load_corrupt_file_keeps_user_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let broken = "[journal]\npath = \"/data/food.json\"\n[discover\nlimit = 3\n";
        fs::write(&path, broken).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.discover.limit, 10);
        assert_eq!(config.journal.path, None);
        assert_eq!(fs::read_to_string(&path).unwrap(), broken);
    }
}
