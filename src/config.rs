use crate::error::{Result, ResolverError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

const CONFIG_PATH: &str = "config.toml";

/// Tool configuration loaded from `config.toml`. Every field has a default
/// so the tool runs without a config file; CLI flags override whatever is
/// loaded here.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Local catalog snapshot (JSON array of card records).
    pub snapshot_path: String,
    /// Bulk-data endpoint used by `fetch-catalog`.
    pub bulk_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "catalog/cards.json".to_string(),
            bulk_url: "https://api.scryfall.com/bulk-data/default-cards".to_string(),
            timeout_seconds: 120,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to
    /// defaults when the file does not exist. A file that exists but does
    /// not parse is a hard error rather than a silent fallback.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ResolverError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_from("does-not-exist.toml").unwrap();
        assert_eq!(config.output.dir, "output");
        assert_eq!(config.catalog.timeout_seconds, 120);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\ndir = \"reports\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.output.dir, "reports");
        assert_eq!(config.catalog.snapshot_path, "catalog/cards.json");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[catalog\nsnapshot_path = 3").unwrap();

        assert!(Config::load_from(file.path()).is_err());
    }
}
