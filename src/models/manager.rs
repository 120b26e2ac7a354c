//! Model manager for loading and looking up embedding providers

use crate::core::config::{EmbeddingConfig, EmbeddingProvider};
use crate::core::{Result, SearchError};
use crate::models::{OllamaModel, OpenAiCompatibleModel};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    fn name(&self) -> &str;
    fn dimension(&self) -> usize;
    async fn generate(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>>;
    async fn generate_batch(&self, texts: Vec<String>, batch_size: usize) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::new();

        for chunk in texts.chunks(batch_size.max(1)) {
            let chunk_embeddings = self.generate(chunk.to_vec()).await?;
            embeddings.extend(chunk_embeddings);
        }

        Ok(embeddings)
    }

    /// Embeds a single text and checks the vector has the model's dimension.
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self
            .generate(vec![text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::EmbeddingFailure("No embedding generated".to_string()))?;

        if embedding.len() != self.dimension() {
            return Err(SearchError::EmbeddingFailure(format!(
                "{} returned {} values, expected {}",
                self.name(),
                embedding.len(),
                self.dimension()
            )));
        }

        Ok(embedding)
    }
}

#[derive(Clone)]
pub struct ModelManager {
    models: Arc<RwLock<HashMap<String, Arc<dyn EmbeddingModel>>>>,
    config: EmbeddingConfig,
}

impl ModelManager {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            models: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub fn default_model_name(&self) -> &str {
        &self.config.default_model
    }

    pub async fn load_model(&self, model_name: &str) -> Result<()> {
        let mut models = self.models.write().await;

        if models.contains_key(model_name) {
            return Ok(());
        }

        let model: Arc<dyn EmbeddingModel> = match self.config.provider {
            EmbeddingProvider::OpenAi => Arc::new(OpenAiCompatibleModel::new(model_name, &self.config)?),
            EmbeddingProvider::Ollama => Arc::new(OllamaModel::new(model_name, &self.config)?),
        };

        models.insert(model_name.to_string(), model);
        tracing::info!("Loaded model: {} ({:?})", model_name, self.config.provider);

        Ok(())
    }

    /// Registers an already-built model under its own name.
    pub async fn register(&self, model: Arc<dyn EmbeddingModel>) {
        let mut models = self.models.write().await;
        tracing::info!("Registered model: {}", model.name());
        models.insert(model.name().to_string(), model);
    }

    pub async fn get_model(&self, model_name: &str) -> Result<Arc<dyn EmbeddingModel>> {
        let models = self.models.read().await;

        models
            .get(model_name)
            .cloned()
            .ok_or_else(|| SearchError::EmbeddingFailure(format!("Model not loaded: {}", model_name)))
    }

    pub async fn ensure_model_loaded(&self, model_name: &str) -> Result<Arc<dyn EmbeddingModel>> {
        if let Ok(model) = self.get_model(model_name).await {
            return Ok(model);
        }

        self.load_model(model_name).await?;
        self.get_model(model_name).await
    }

    pub async fn default_model(&self) -> Result<Arc<dyn EmbeddingModel>> {
        let name = self.config.default_model.clone();
        self.ensure_model_loaded(&name).await
    }

    pub async fn list_models(&self) -> Vec<String> {
        let models = self.models.read().await;
        let mut names: Vec<String> = models.keys().cloned().collect();
        names.sort();
        names
    }
}
