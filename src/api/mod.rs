//! HTTP endpoints for the cheese search service

pub mod dataset;
pub mod health;
pub mod page;
pub mod search;


pub use dataset::get_dataset;
pub use health::health_check;
pub use page::search_page;
pub use search::{list_models, search_cheese, SearchParams};

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(search_page))
        .route("/health", get(health_check))
        .route("/api/v1/search", get(search_cheese))
        .route("/api/v1/dataset", get(get_dataset))
        .route("/api/v1/models", get(list_models))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
