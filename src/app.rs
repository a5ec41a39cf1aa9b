use std::sync::Arc;

use crate::config::Config;
use crate::db::Repository;
use crate::error::Result;
use crate::feed::FeedFetcher;
use crate::models::Article;

/// The services a request needs. Cloned into every handler; holds no mutable
/// state of its own.
#[derive(Clone)]
pub struct App {
    pub repository: Repository,
    fetcher: Arc<FeedFetcher>,
}

impl App {
    pub async fn new(config: &Config) -> Result<Self> {
        let repository = Repository::open(&config.db_path).await?;
        let fetcher = FeedFetcher::new(config.feed_url.clone())?;
        Ok(Self::with_services(repository, fetcher))
    }

    pub fn with_services(repository: Repository, fetcher: FeedFetcher) -> Self {
        Self {
            repository,
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn fetcher(&self) -> &FeedFetcher {
        &self.fetcher
    }

    /// Fetches the feed and stores every article in it.
    pub async fn save_feed(&self) -> Result<usize> {
        let articles = self.fetcher.fetch_articles().await?;
        let saved = self.repository.save_articles(articles).await?;
        tracing::info!(saved, url = %self.fetcher.feed_url(), "saved feed articles");
        Ok(saved)
    }

    pub async fn articles(&self) -> Result<Vec<Article>> {
        self.repository.get_all_articles().await
    }
}
