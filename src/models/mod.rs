//! Embedding providers

pub mod manager;
pub mod ollama;
pub mod openai;

pub use manager::{EmbeddingModel, ModelManager};
pub use ollama::OllamaModel;
pub use openai::OpenAiCompatibleModel;
