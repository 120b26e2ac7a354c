//! Raw sample dataset for the side panel

use axum::{extract::State, response::Json};

use crate::core::DatasetRecord;
use crate::AppState;

pub async fn get_dataset(State(app_state): State<AppState>) -> Json<Vec<DatasetRecord>> {
    Json(app_state.dataset.records().to_vec())
}
