use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to open database: {0}")]
    Connection(#[source] tokio_rusqlite::Error),

    #[error("Failed to create schema: {0}")]
    Schema(#[source] tokio_rusqlite::Error),

    #[error("Failed to fetch feed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Failed to fetch feed: HTTP {0}")]
    FetchStatus(StatusCode),

    #[error("Failed to decode feed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Query failed: {0}")]
    Query(#[source] tokio_rusqlite::Error),

    #[error("Insert failed: {0}")]
    Insert(#[source] tokio_rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl AppError {
    /// True for failures that happened before any row was written.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            AppError::Fetch(_) | AppError::FetchStatus(_) | AppError::Decode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
