//! The HTML demo page

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};

use crate::api::SearchParams;
use crate::core::QueryInput;
use crate::render::{render_page, PageView};
use crate::AppState;

pub async fn search_page(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Html<String>) {
    let default_limit = app_state.config.ui.default_limit;
    let submitted = params.name.is_some() || params.description.is_some();

    let echoed = QueryInput {
        name_text: params.name.clone(),
        description_text: params.description.clone(),
        result_limit: default_limit,
    };

    let (input, result) = match params.into_input(default_limit) {
        Ok(input) if submitted => {
            let result = app_state.pipeline.run(&input).await;
            (input, result)
        }
        Ok(input) => (input, Ok(None)),
        Err(e) => (echoed, Err(e)),
    };

    let dataset_json = app_state
        .dataset
        .to_pretty_json()
        .unwrap_or_else(|e| format!("dataset unavailable: {}", e));

    let (status, outcome, error) = match &result {
        Ok(outcome) => (StatusCode::OK, outcome.as_ref(), None),
        Err(e) => (e.status_code(), None, Some(e)),
    };

    let html = render_page(&PageView {
        input: &input,
        outcome,
        error,
        dataset_json: &dataset_json,
        dimension: app_state.config.embedding.dimension,
    });

    (status, Html(html))
}
