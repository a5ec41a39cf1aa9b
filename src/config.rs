use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;

use crate::error::{AppError, Result};

const APP_DIR: &str = "article-mirror";
const ENV_PREFIX: &str = "ARTICLE_MIRROR_";

const DEFAULT_FEED_URL: &str = "https://gist.githubusercontent.com/gotokatsuya/cc78c04d3af15ebe43afe5ad970bc334/raw/dc39bacb834105c81497ba08940be5432ed69848/articles.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    #[serde(default = "default_feed_url")]
    pub feed_url: Url,

    /// Fallback filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR);
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("articles.db").to_string_lossy().to_string()
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_feed_url() -> Url {
    Url::parse(DEFAULT_FEED_URL).expect("default feed url is valid")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            listen_addr: default_listen_addr(),
            feed_url: default_feed_url(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Reads the config file (writing defaults on first run), then applies
    /// `ARTICLE_MIRROR_*` environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)?
        } else {
            let config = Config::default();
            config.save()?;
            config
        };

        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(db_path) = var("DB_PATH") {
            self.db_path = db_path;
        }
        if let Some(addr) = var("LISTEN_ADDR") {
            self.listen_addr = addr
                .parse()
                .map_err(|e| AppError::Config(format!("invalid listen address {addr:?}: {e}")))?;
        }
        if let Some(url) = var("FEED_URL") {
            self.feed_url = Url::parse(&url)
                .map_err(|e| AppError::Config(format!("invalid feed url {url:?}: {e}")))?;
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = level;
        }

        Ok(self)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }
}
