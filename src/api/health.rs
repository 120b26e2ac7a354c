//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub store: String,
    pub store_connected: bool,
    pub model: String,
    pub model_loaded: bool,
}

pub async fn health_check(State(app_state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = app_state.pipeline.store();
    let store_connected = match store.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let model_name = app_state.pipeline.model().name().to_string();
    let model_loaded = app_state.model_manager.get_model(&model_name).await.is_ok();

    let healthy = store_connected && model_loaded;
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        service: "cheese-search".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        store: store.name().to_string(),
        store_connected,
        model: model_name,
        model_loaded,
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
