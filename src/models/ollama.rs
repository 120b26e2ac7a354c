//! Ollama model integration via HTTP API
//!
//! Uses the `/api/embeddings` endpoint, one prompt per request.

use crate::core::config::EmbeddingConfig;
use crate::core::{Result, SearchError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct OllamaEmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

pub struct OllamaModel {
    name: String,
    ollama_url: String,
    dimension: usize,
    client: reqwest::Client,
}

impl OllamaModel {
    pub fn new(model_name: &str, config: &EmbeddingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            name: model_name.to_string(),
            ollama_url: config.base_url.clone(),
            dimension: config.dimension,
            client,
        })
    }

    async fn generate_single(&self, text: &str) -> Result<Vec<f32>> {
        let request = OllamaEmbeddingRequest {
            model: &self.name,
            prompt: text,
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.ollama_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchError::EmbeddingFailure(format!("Ollama request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::EmbeddingFailure(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let result: OllamaEmbeddingResponse = response.json().await.map_err(|e| {
            SearchError::EmbeddingFailure(format!("Failed to parse Ollama response: {}", e))
        })?;

        Ok(result.embedding)
    }
}

#[async_trait]
impl crate::models::EmbeddingModel for OllamaModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn generate(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());

        for text in &texts {
            embeddings.push(self.generate_single(text).await?);
        }

        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::models::EmbeddingModel;

    #[tokio::test]
    async fn test_empty_input_makes_no_request() {
        let mut config = Config::default().embedding;
        // Nothing listens here; an HTTP call would fail the test.
        config.base_url = "http://127.0.0.1:9".to_string();
        let model = OllamaModel::new("all-minilm", &config).unwrap();

        assert!(model.generate(vec![]).await.unwrap().is_empty());
        assert_eq!(model.dimension(), 384);
    }

    #[test]
    fn test_response_shape() {
        let response: OllamaEmbeddingResponse =
            serde_json::from_str(r#"{"embedding": [0.25, -0.5]}"#).unwrap();
        assert_eq!(response.embedding, vec![0.25, -0.5]);
    }
}
