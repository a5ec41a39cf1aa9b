mod handlers;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::app::App;

pub use handlers::{get_articles, save_articles};

pub fn router(app: App) -> Router {
    Router::new()
        .route("/save", get(save_articles))
        .route("/articles", get(get_articles))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}
