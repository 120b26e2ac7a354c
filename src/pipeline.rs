//! One submission: validate, embed, build, execute, format

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::core::{Config, QueryBuilder, QueryInput, Result, SearchError, SearchMode};
use crate::models::EmbeddingModel;
use crate::render::{DisplayTable, ResultFormatter};
use crate::storage::SearchStore;

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub mode: SearchMode,
    pub embedding: Vec<f32>,
    pub table: DisplayTable,
    pub elapsed_ms: u64,
}

pub struct SearchPipeline {
    model: Arc<dyn EmbeddingModel>,
    store: Arc<dyn SearchStore>,
    builder: QueryBuilder,
    formatter: ResultFormatter,
}

impl SearchPipeline {
    pub fn new(
        config: &Config,
        model: Arc<dyn EmbeddingModel>,
        store: Arc<dyn SearchStore>,
    ) -> Result<Self> {
        Ok(Self {
            builder: QueryBuilder::new(&config.store, config.embedding.dimension)?,
            formatter: ResultFormatter::new(config.ui.image_max_height_px),
            model,
            store,
        })
    }

    pub fn model(&self) -> &Arc<dyn EmbeddingModel> {
        &self.model
    }

    pub fn store(&self) -> &Arc<dyn SearchStore> {
        &self.store
    }

    /// Returns `Ok(None)` without calling the provider or the store when the
    /// name is blank. Otherwise makes exactly one provider call and one store
    /// call. Nothing is retried.
    pub async fn run(&self, input: &QueryInput) -> Result<Option<SearchOutcome>> {
        input.validate()?;

        let Some(name) = input.name() else {
            debug!("Empty name, no search executed");
            return Ok(None);
        };

        let start = Instant::now();

        let embedding = self.model.encode(name).await.map_err(|e| {
            warn!("Embedding failed: {}", e);
            match e {
                SearchError::EmbeddingFailure(_) => e,
                other => SearchError::EmbeddingFailure(other.to_string()),
            }
        })?;
        debug!(dimension = embedding.len(), "Encoded query text");

        let Some(query) = self.builder.build(input, embedding)? else {
            return Ok(None);
        };

        let rows = self.store.execute(&query).await.map_err(|e| {
            warn!("Search on {} failed: {}", self.store.name(), e);
            match e {
                SearchError::QueryExecutionFailure(_) => e,
                other => SearchError::QueryExecutionFailure(other.to_string()),
            }
        })?;

        let table = self.formatter.format(&rows).map_err(|e| {
            warn!("Discarding result set: {}", e);
            e
        })?;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            mode = ?query.mode,
            rows = table.len(),
            limit = query.limit,
            elapsed_ms,
            "Search complete"
        );

        Ok(Some(SearchOutcome {
            mode: query.mode,
            embedding: query.embedding,
            table,
            elapsed_ms,
        }))
    }
}
