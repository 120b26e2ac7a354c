//! Sample catalogue shown in the side panel

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::core::Result;

/// One catalogue entry. Unknown fields are kept so the side panel shows the
/// file as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aroma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<DatasetRecord>,
}

impl Dataset {
    pub fn new(records: Vec<DatasetRecord>) -> Self {
        Self { records }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<DatasetRecord> = serde_json::from_str(json)?;
        Ok(Self { records })
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let dataset = Self::from_json(&json)?;
        info!("Loaded {} dataset records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}
