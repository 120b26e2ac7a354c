//! JSON search endpoints

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::core::{QueryInput, Result, SearchError, SearchMode};
use crate::render::SearchResultRow;
use crate::AppState;

/// Query-string form of a submission, shared by the page and the JSON API.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Parsed in `into_input`; a non-numeric value is `InvalidInput`.
    pub limit: Option<String>,
}

impl SearchParams {
    pub fn into_input(self, default_limit: u8) -> Result<QueryInput> {
        let result_limit = match self.limit.as_deref().map(str::trim) {
            Some(limit) if !limit.is_empty() => parse_limit(limit)?,
            _ => default_limit,
        };

        Ok(QueryInput {
            name_text: self.name,
            description_text: self.description,
            result_limit,
        })
    }
}

fn parse_limit(raw: &str) -> Result<u8> {
    let limit: i64 = raw.parse().map_err(|_| {
        SearchError::InvalidInput(format!("result limit must be a whole number, got {:?}", raw))
    })?;
    u8::try_from(limit)
        .map_err(|_| SearchError::InvalidInput(format!("result limit out of range: {}", limit)))
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// False when the name was blank and nothing ran.
    pub executed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SearchMode>,
    pub limit: u8,
    pub results: Vec<SearchResultRow>,
    pub total_found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub loaded: Vec<String>,
    pub default: String,
    pub dimension: usize,
}

pub async fn search_cheese(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let input = params.into_input(app_state.config.ui.default_limit)?;
    let outcome = app_state.pipeline.run(&input).await?;

    let response = match outcome {
        Some(outcome) => {
            let results: Vec<SearchResultRow> = outcome
                .table
                .rows()
                .iter()
                .map(|display| display.row.clone())
                .collect();

            SearchResponse {
                executed: true,
                mode: Some(outcome.mode),
                limit: input.result_limit,
                total_found: results.len(),
                results,
                dimension: Some(outcome.embedding.len()),
            }
        }
        None => SearchResponse {
            executed: false,
            mode: None,
            limit: input.result_limit,
            results: Vec::new(),
            total_found: 0,
            dimension: None,
        },
    };

    Ok(Json(response))
}

pub async fn list_models(State(app_state): State<AppState>) -> Json<ModelsResponse> {
    let loaded = app_state.model_manager.list_models().await;

    Json(ModelsResponse {
        loaded,
        default: app_state.model_manager.default_model_name().to_string(),
        dimension: app_state.config.embedding.dimension,
    })
}
