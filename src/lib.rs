//! Cheese Search Library
//!
//! Embeds a free-text cheese query, ranks a catalogue by vector similarity
//! with an optional description keyword filter, and renders the hits as an
//! HTML table.

pub mod api;
pub mod core;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use tracing::info;

use crate::core::{Config, Dataset, Result, StoreBackend};
use crate::models::{EmbeddingModel, ModelManager};
use crate::pipeline::SearchPipeline;
use crate::storage::{InMemoryStore, PostgresStore, SearchStore};

// Application state for Axum
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub model_manager: Arc<ModelManager>,
    pub pipeline: Arc<SearchPipeline>,
    pub dataset: Arc<Dataset>,
}

pub struct CheeseSearchService {
    pub config: Config,
    pub model_manager: Arc<ModelManager>,
    pub dataset: Arc<Dataset>,
    pub pipeline: Arc<SearchPipeline>,
}

impl CheeseSearchService {
    pub async fn new(config: Config) -> Result<Self> {
        let model_manager = Arc::new(ModelManager::new(config.embedding.clone()));
        let model = model_manager.default_model().await?;
        let dataset = Arc::new(Dataset::load(&config.ui.dataset_path).await?);

        let store: Arc<dyn SearchStore> = match config.store.backend {
            StoreBackend::Postgres => Arc::new(PostgresStore::connect_lazy(&config.store)?),
            StoreBackend::Memory => {
                Arc::new(InMemoryStore::index_dataset(&dataset, model.as_ref()).await?)
            }
        };
        info!("Using {} search store", store.name());

        Self::with_parts(config, model_manager, model, store, dataset)
    }

    /// Assembles the service from already-built parts.
    pub fn with_parts(
        config: Config,
        model_manager: Arc<ModelManager>,
        model: Arc<dyn EmbeddingModel>,
        store: Arc<dyn SearchStore>,
        dataset: Arc<Dataset>,
    ) -> Result<Self> {
        let pipeline = Arc::new(SearchPipeline::new(&config, model, store)?);

        Ok(Self {
            config,
            model_manager,
            dataset,
            pipeline,
        })
    }

    pub fn app_state(self) -> AppState {
        AppState {
            config: Arc::new(self.config),
            model_manager: self.model_manager,
            pipeline: self.pipeline,
            dataset: self.dataset,
        }
    }
}
