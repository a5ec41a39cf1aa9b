use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::app::App;

const SAVED: &str = "Articles saved successfully";
const FETCH_FAILED: &str = "Failed to fetch articles";
const SAVE_FAILED: &str = "Error saving articles";
const READ_FAILED: &str = "Error retrieving articles";

fn internal_error(message: &'static str) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

/// `GET /save`: mirror the remote feed into the store.
pub async fn save_articles(State(app): State<App>) -> Response {
    match app.save_feed().await {
        Ok(_) => (StatusCode::OK, SAVED).into_response(),
        Err(e) if e.is_fetch() => {
            tracing::error!(error = %e, url = %app.fetcher().feed_url(), "failed to fetch articles");
            internal_error(FETCH_FAILED)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to save articles");
            internal_error(SAVE_FAILED)
        }
    }
}

/// `GET /articles`: every stored article with its media, as JSON.
pub async fn get_articles(State(app): State<App>) -> Response {
    match app.articles().await {
        Ok(articles) => Json(articles).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to read articles");
            internal_error(READ_FAILED)
        }
    }
}
