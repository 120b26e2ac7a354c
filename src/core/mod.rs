//! Core types: configuration, errors, input, query construction

pub mod config;
pub mod dataset;
pub mod error;
pub mod input;
pub mod query;
pub mod vector_search;

pub use config::{Config, EmbeddingConfig, EmbeddingProvider, ServerConfig, StoreBackend, StoreConfig, UiConfig};
pub use dataset::{Dataset, DatasetRecord};
pub use error::{ErrorResponse, Result, SearchError};
pub use input::{QueryInput, MAX_RESULT_LIMIT, MAX_TEXT_LEN, MIN_RESULT_LIMIT};
pub use query::{QueryBuilder, SearchMode, SearchQuery};
