use std::path::Path;

use rusqlite::{params, Row};
use tokio_rusqlite::Connection;

use crate::error::{AppError, Result};
use crate::models::{Article, Media, NewArticle};

use super::schema::{PRAGMAS, SCHEMA};

/// Handle onto the article store.
///
/// Cloning is cheap: every clone talks to the same background SQLite thread,
/// which serializes calls from concurrent requests.
#[derive(Clone)]
pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path)
            .await
            .map_err(AppError::Connection)?;
        Self::bootstrap(conn).await
    }

    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(AppError::Connection)?;
        Self::bootstrap(conn).await
    }

    async fn bootstrap(conn: Connection) -> Result<Self> {
        conn.call(|conn| {
            conn.execute_batch(PRAGMAS)?;
            Ok(())
        })
        .await
        .map_err(AppError::Connection)?;

        let repository = Self { conn };
        repository.init_schema().await?;
        Ok(repository)
    }

    /// Creates the `articles` and `medias` tables if they are missing.
    pub async fn init_schema(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await
            .map_err(AppError::Schema)
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await.map_err(AppError::Connection)
    }

    // Writer

    /// Inserts one article and then each of its media rows, in order.
    ///
    /// Rows are committed one statement at a time. If a media insert fails the
    /// article row and any media inserted before it stay in the store.
    pub async fn save_article(&self, article: NewArticle) -> Result<i64> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO articles (title, body, publishedAt) VALUES (?1, ?2, ?3)",
                    params![article.title, article.body, article.published_at],
                )?;
                let article_id = conn.last_insert_rowid();

                let mut stmt = conn.prepare_cached(
                    "INSERT INTO medias (article_id, contentUrl, contentType) VALUES (?1, ?2, ?3)",
                )?;
                for media in &article.medias {
                    stmt.execute(params![article_id, media.content_url, media.content_type])?;
                }

                Ok(article_id)
            })
            .await
            .map_err(AppError::Insert)
    }

    /// Saves articles in feed order, stopping at the first failure.
    pub async fn save_articles(&self, articles: Vec<NewArticle>) -> Result<usize> {
        let mut saved = 0;
        for article in articles {
            let media_count = article.medias.len();
            let id = self.save_article(article).await?;
            tracing::debug!(article_id = id, media_count, "saved article");
            saved += 1;
        }
        Ok(saved)
    }

    // Reader

    /// Loads every article with its media attached.
    ///
    /// One query for the articles, then one media query per article. Any
    /// failure discards everything read so far.
    pub async fn get_all_articles(&self) -> Result<Vec<Article>> {
        self.conn
            .call(|conn| {
                let mut article_stmt =
                    conn.prepare("SELECT id, title, body, publishedAt FROM articles ORDER BY id")?;
                let mut articles = article_stmt
                    .query_map([], article_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                let mut media_stmt = conn.prepare(
                    "SELECT id, contentUrl, contentType FROM medias WHERE article_id = ?1 ORDER BY id",
                )?;
                for article in &mut articles {
                    article.medias = media_stmt
                        .query_map(params![article.id], media_from_row)?
                        .collect::<std::result::Result<Vec<_>, _>>()?;
                }

                Ok(articles)
            })
            .await
            .map_err(AppError::Query)
    }

    pub async fn count_articles(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM articles").await
    }

    pub async fn count_medias(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) FROM medias").await
    }

    async fn count(&self, sql: &'static str) -> Result<i64> {
        self.conn
            .call(move |conn| Ok(conn.query_row(sql, [], |row| row.get(0))?))
            .await
            .map_err(AppError::Query)
    }
}

// Columns carry no NOT NULL constraint, so tolerate NULL text.
fn article_from_row(row: &Row) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        body: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        medias: Vec::new(),
        published_at: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

fn media_from_row(row: &Row) -> rusqlite::Result<Media> {
    Ok(Media {
        id: row.get(0)?,
        content_url: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        content_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
    })
}
