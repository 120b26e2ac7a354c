//! Test doubles shared by the unit and router tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::core::{Config, Dataset, Result, SearchError, SearchQuery, StoreBackend};
use crate::models::{EmbeddingModel, ModelManager};
use crate::storage::{InMemoryStore, SearchStore, StoreRow};
use crate::{AppState, CheeseSearchService};

pub const TEST_DIMENSION: usize = 384;

pub fn sample_dataset() -> Dataset {
    Dataset::from_json(include_str!("../data/cheese_data.json")).unwrap()
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.store.backend = StoreBackend::Memory;
    config.embedding.default_model = "hash-test".to_string();
    config.embedding.dimension = TEST_DIMENSION;
    config
}

/// Deterministic bag-of-words embedding: each lowercase token bumps one
/// FNV-1a bucket, then the vector is L2-normalised.
pub struct HashEmbeddingModel {
    dimension: usize,
    calls: AtomicUsize,
}

impl HashEmbeddingModel {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        let lowered = text.to_lowercase();
        for token in lowered.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
            for byte in token.bytes() {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(0x0100_0000_01b3);
            }
            vector[(hash % self.dimension as u64) as usize] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }
}

#[async_trait]
impl EmbeddingModel for HashEmbeddingModel {
    fn name(&self) -> &str {
        "hash-test"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn generate(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }
}

pub struct FailingModel;

#[async_trait]
impl EmbeddingModel for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    fn dimension(&self) -> usize {
        TEST_DIMENSION
    }

    async fn generate(&self, _texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        Err(SearchError::EmbeddingFailure("model not reachable".to_string()))
    }
}

/// Wraps a store and counts `execute` calls.
pub struct CountingStore {
    inner: Arc<dyn SearchStore>,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: Arc<dyn SearchStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchStore for CountingStore {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn execute(&self, query: &SearchQuery) -> Result<Vec<StoreRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.execute(query).await
    }

    async fn health_check(&self) -> Result<()> {
        self.inner.health_check().await
    }
}

pub struct FailingStore;

#[async_trait]
impl SearchStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn execute(&self, _query: &SearchQuery) -> Result<Vec<StoreRow>> {
        Err(SearchError::QueryExecutionFailure("connection refused".to_string()))
    }

    async fn health_check(&self) -> Result<()> {
        Err(SearchError::QueryExecutionFailure("connection refused".to_string()))
    }
}

/// Returns the same rows for every query.
pub struct FixedRowsStore {
    pub rows: Vec<StoreRow>,
}

#[async_trait]
impl SearchStore for FixedRowsStore {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn execute(&self, _query: &SearchQuery) -> Result<Vec<StoreRow>> {
        Ok(self.rows.clone())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

pub async fn memory_store(model: &HashEmbeddingModel) -> InMemoryStore {
    InMemoryStore::index_dataset(&sample_dataset(), model).await.unwrap()
}

pub struct TestHarness {
    pub state: AppState,
    pub model: Arc<HashEmbeddingModel>,
    pub store: Arc<CountingStore>,
}

/// App state over the bundled dataset, the hash model and a counted
/// in-memory store.
pub async fn harness() -> TestHarness {
    let config = test_config();
    let model = Arc::new(HashEmbeddingModel::new(TEST_DIMENSION));
    let store = Arc::new(CountingStore::new(Arc::new(memory_store(&model).await)));
    let manager = Arc::new(ModelManager::new(config.embedding.clone()));
    manager.register(model.clone()).await;

    let service = CheeseSearchService::with_parts(
        config,
        manager,
        model.clone(),
        store.clone(),
        Arc::new(sample_dataset()),
    )
    .unwrap();

    TestHarness {
        state: service.app_state(),
        model,
        store,
    }
}
