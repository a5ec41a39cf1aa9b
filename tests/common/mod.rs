use std::path::Path;

use article_mirror::app::App;
use article_mirror::db::Repository;
use article_mirror::feed::FeedFetcher;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    routing,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::Url;

pub const SINGLE_ARTICLE_FEED: &str = r#"[{"title":"A","body":"B","publishedAt":"2024-01-01","medias":[{"contentUrl":"http://x/1.png","contentType":"image/png"}]}]"#;

/// Serves `body` with `status` at `/articles.json` on an ephemeral local port.
pub async fn serve_feed(status: StatusCode, body: &'static str) -> Url {
    let feed = Router::new().route(
        "/articles.json",
        routing::get(move || async move { (status, body) }),
    );
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind feed listener");
    let addr = listener.local_addr().expect("listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, feed).await.expect("feed server failed");
    });
    Url::parse(&format!("http://{addr}/articles.json")).expect("invalid feed url")
}

pub async fn in_memory_app(feed_url: Url) -> App {
    let repository = Repository::open_in_memory()
        .await
        .expect("failed to open in-memory store");
    App::with_services(repository, FeedFetcher::new(feed_url).expect("failed to build fetcher"))
}

pub async fn file_app(db_path: &Path, feed_url: Url) -> App {
    let repository = Repository::open(db_path)
        .await
        .expect("failed to open store");
    App::with_services(repository, FeedFetcher::new(feed_url).expect("failed to build fetcher"))
}

pub async fn get(app: &App, uri: &str) -> Response {
    article_mirror::server::router(app.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

pub async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not utf-8")
}
