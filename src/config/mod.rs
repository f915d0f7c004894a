//! Configuration management for Tidings.
//!
//! Configuration is read from `~/.config/tidings/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::fetcher::DEFAULT_MAX_REDIRECTS;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    /// SQLite file holding the option group; defaults to the data directory.
    pub database_path: Option<PathBuf>,
}

/// Where and how the announcement feed is fetched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub max_redirects: usize,
    pub product_name: String,
    pub product_version: String,
    /// Target of the "learn more" link in the subscription proposal
    pub learn_more_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "https://blog.rust-lang.org/feed.xml".to_string(),
            timeout_secs: 30,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            product_name: env!("CARGO_PKG_NAME").to_string(),
            product_version: env!("CARGO_PKG_VERSION").to_string(),
            learn_more_url: "https://blog.rust-lang.org/".to_string(),
        }
    }
}

impl FeedConfig {
    pub fn user_agent(&self) -> String {
        format!("{} {}", self.product_name, self.product_version)
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/tidings/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tidings").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        format!(
            r##"# Tidings Configuration
#
# Uncomment to keep the consent and last-check options somewhere other
# than the platform data directory.
# database_path = "/path/to/tidings.db"

[feed]
# Announcement feed checked at most once a day after opting in
url = "https://blog.rust-lang.org/feed.xml"

# Per-request timeout in seconds
timeout_secs = 30

# Redirect hops followed before giving up
max_redirects = {DEFAULT_MAX_REDIRECTS}

# Sent as "User-Agent: <product_name> <product_version>"
product_name = "{name}"
product_version = "{version}"

# Opened by the "Learn more" link of the subscription proposal
learn_more_url = "https://blog.rust-lang.org/"
"##,
            name = env!("CARGO_PKG_NAME"),
            version = env!("CARGO_PKG_VERSION"),
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.feed.url, FeedConfig::default().url);
        assert_eq!(config.feed.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert_eq!(config.database_path, None);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[feed]
url = "https://example.com/news.atom"
timeout_secs = 5
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.feed.url, "https://example.com/news.atom");
        assert_eq!(config.feed.timeout_secs, 5);
        assert_eq!(config.feed.max_redirects, DEFAULT_MAX_REDIRECTS);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.feed.timeout_secs, 30);
    }

    #[test]
    fn test_user_agent() {
        let feed = FeedConfig {
            product_name: "Tidings".into(),
            product_version: "1.2".into(),
            ..FeedConfig::default()
        };
        assert_eq!(feed.user_agent(), "Tidings 1.2");
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[feed\nurl = 1").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database_path = \"/tmp/t.db\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/t.db")));
    }
}
