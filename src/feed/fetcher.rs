use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::NewArticle;

const USER_AGENT: &str = concat!("article-mirror/", env!("CARGO_PKG_VERSION"));

/// Retrieves the remote article feed.
pub struct FeedFetcher {
    client: Client,
    feed_url: Url,
}

impl FeedFetcher {
    pub fn new(feed_url: Url) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { client, feed_url })
    }

    pub fn feed_url(&self) -> &Url {
        &self.feed_url
    }

    pub async fn fetch_articles(&self) -> Result<Vec<NewArticle>> {
        let response = self.client.get(self.feed_url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(AppError::FetchStatus(response.status()));
        }

        let bytes = response.bytes().await?;
        let articles: Vec<NewArticle> = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            url = %self.feed_url,
            count = articles.len(),
            "fetched feed"
        );
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{http::StatusCode, routing::get, Router};
    use tokio::net::TcpListener;

    async fn serve(status: StatusCode, body: &'static str) -> Url {
        let app = Router::new().route("/feed.json", get(move || async move { (status, body) }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/feed.json")).unwrap()
    }

    #[tokio::test]
    async fn decodes_feed_articles() {
        let url = serve(
            StatusCode::OK,
            r#"[{"title":"A","body":"B","publishedAt":"2024-01-01","medias":[{"contentUrl":"http://x/1.png","contentType":"image/png"}]}]"#,
        )
        .await;

        let articles = FeedFetcher::new(url).unwrap().fetch_articles().await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "A");
        assert_eq!(articles[0].medias[0].content_url, "http://x/1.png");
    }

    #[tokio::test]
    async fn invalid_json_is_a_decode_error() {
        let url = serve(StatusCode::OK, "<html>not json</html>").await;

        let err = FeedFetcher::new(url).unwrap().fetch_articles().await.unwrap_err();

        assert!(matches!(err, AppError::Decode(_)), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn non_success_status_is_rejected_before_decoding() {
        let url = serve(StatusCode::SERVICE_UNAVAILABLE, "[]").await;

        let err = FeedFetcher::new(url).unwrap().fetch_articles().await.unwrap_err();

        assert!(matches!(
            err,
            AppError::FetchStatus(status) if status == StatusCode::SERVICE_UNAVAILABLE
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = Url::parse(&format!("http://{addr}/feed.json")).unwrap();

        let err = FeedFetcher::new(url).unwrap().fetch_articles().await.unwrap_err();

        assert!(matches!(err, AppError::Fetch(_)));
    }
}
