//! OpenAI-compatible embeddings endpoint
//!
//! Speaks the `/embeddings` request/response shape that OpenAI, Hugging Face
//! text-embeddings-inference and most self-hosted servers share.

use crate::core::config::EmbeddingConfig;
use crate::core::{Result, SearchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct OpenAiCompatibleModel {
    name: String,
    dimension: usize,
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAiCompatibleModel {
    pub fn new(name: &str, config: &EmbeddingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            name: name.to_string(),
            dimension: config.dimension,
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl crate::models::EmbeddingModel for OpenAiCompatibleModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn generate(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let expected = texts.len();
        let request = EmbeddingRequest {
            model: &self.name,
            input: texts,
        };

        let mut builder = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SearchError::EmbeddingFailure(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::EmbeddingFailure(format!(
                "Embedding API error: {} - {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| SearchError::EmbeddingFailure(format!("Failed to parse response: {}", e)))?;

        let embeddings = embedding_response.into_ordered();
        if embeddings.len() != expected {
            return Err(SearchError::EmbeddingFailure(format!(
                "Requested {} embeddings, received {}",
                expected,
                embeddings.len()
            )));
        }

        Ok(embeddings)
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl EmbeddingResponse {
    /// Servers may return items out of order; `index` is authoritative.
    fn into_ordered(mut self) -> Vec<Vec<f32>> {
        self.data.sort_by_key(|d| d.index);
        self.data.into_iter().map(|d| d.embedding).collect()
    }
}
