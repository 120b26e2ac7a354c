//! In-memory search store over the sample catalogue
//!
//! Ranks by cosine distance and filters by case-insensitive substring on the
//! description, matching what the pgvector statement does.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::core::dataset::{Dataset, DatasetRecord};
use crate::core::vector_search::nearest;
use crate::core::{Result, SearchError, SearchQuery};
use crate::models::EmbeddingModel;
use crate::storage::{SearchStore, StoreRow};

const INDEX_BATCH_SIZE: usize = 32;

#[derive(Debug, Clone)]
pub struct CatalogueItem {
    pub record: DatasetRecord,
    pub vector: Vec<f32>,
}

impl CatalogueItem {
    fn to_row(&self) -> StoreRow {
        let mut row = StoreRow::new();
        row.insert("name", Some(self.record.name.clone()));
        row.insert("aroma", self.record.aroma.clone());
        row.insert("country_origin", self.record.country_origin.clone());
        row.insert("image", self.record.image.clone());
        row
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: Vec<CatalogueItem>,
}

impl InMemoryStore {
    pub fn new(items: Vec<CatalogueItem>) -> Self {
        Self { items }
    }

    /// Embeds every record's name with `model` and indexes the result.
    pub async fn index_dataset(dataset: &Dataset, model: &dyn EmbeddingModel) -> Result<Self> {
        let names: Vec<String> = dataset.records().iter().map(|r| r.name.clone()).collect();
        let vectors = model.generate_batch(names, INDEX_BATCH_SIZE).await?;

        if vectors.len() != dataset.len() {
            return Err(SearchError::EmbeddingFailure(format!(
                "indexed {} records but received {} vectors",
                dataset.len(),
                vectors.len()
            )));
        }

        let items: Vec<CatalogueItem> = dataset
            .records()
            .iter()
            .cloned()
            .zip(vectors)
            .map(|(record, vector)| CatalogueItem { record, vector })
            .collect();

        info!("Indexed {} catalogue items with {}", items.len(), model.name());
        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl SearchStore for InMemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn execute(&self, query: &SearchQuery) -> Result<Vec<StoreRow>> {
        let candidates = self
            .items
            .iter()
            .filter(|item| query.keyword_matches(item.record.description.as_deref().unwrap_or("")))
            .map(|item| (item, item.vector.as_slice()));

        let ranked = nearest(&query.embedding, candidates, usize::from(query.limit));
        debug!(mode = ?query.mode, hits = ranked.len(), "In-memory search complete");

        Ok(ranked.into_iter().map(|r| r.item.to_row()).collect())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SearchMode;

    fn item(name: &str, description: &str, vector: Vec<f32>) -> CatalogueItem {
        CatalogueItem {
            record: DatasetRecord {
                name: name.to_string(),
                aroma: Some("mild".to_string()),
                country_origin: Some("France".to_string()),
                image: Some(format!("{}.jpg", name.to_lowercase())),
                description: Some(description.to_string()),
                extra: Default::default(),
            },
            vector,
        }
    }

    fn store() -> InMemoryStore {
        InMemoryStore::new(vec![
            item("Comte", "Firm and nutty", vec![0.0, 1.0]),
            item("Brie", "Soft and buttery", vec![1.0, 0.0]),
            item("Gruyere", "Sweet, slightly NUTTY", vec![0.8, 0.2]),
        ])
    }

    fn query(keyword: Option<&str>, limit: u8) -> SearchQuery {
        SearchQuery {
            mode: if keyword.is_some() {
                SearchMode::VectorKeyword
            } else {
                SearchMode::VectorOnly
            },
            keyspace: "ks1".to_string(),
            table: "images".to_string(),
            embedding: vec![1.0, 0.0],
            keyword: keyword.map(str::to_string),
            limit,
        }
    }

    #[tokio::test]
    async fn test_vector_only_ranks_by_distance() {
        let rows = store().execute(&query(None, 3)).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.get("name").unwrap()).collect();
        assert_eq!(names, vec!["Brie", "Gruyere", "Comte"]);
    }

    #[tokio::test]
    async fn test_keyword_filters_before_ranking() {
        let rows = store().execute(&query(Some("nutty"), 3)).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.get("name").unwrap()).collect();
        assert_eq!(names, vec!["Gruyere", "Comte"]);
    }

    #[tokio::test]
    async fn test_limit_is_honoured() {
        let rows = store().execute(&query(None, 1)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("image"), Some("brie.jpg"));
    }

    #[tokio::test]
    async fn test_rows_carry_only_result_columns() {
        let rows = store().execute(&query(None, 1)).await.unwrap();
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0].get("description"), None);
    }
}
