//! Configuration for the cheese search service

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::core::{Result, SearchError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub embedding: EmbeddingConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "pgvector" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(SearchError::ConfigError(format!("Unknown STORE_BACKEND: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub postgres_url: String,
    /// Schema holding the catalogue table.
    pub keyspace: String,
    pub table: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Any server exposing an OpenAI-style `/embeddings` endpoint.
    OpenAi,
    Ollama,
}

impl FromStr for EmbeddingProvider {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "openai" | "tei" | "http" => Ok(EmbeddingProvider::OpenAi),
            "ollama" => Ok(EmbeddingProvider::Ollama),
            other => Err(SearchError::ConfigError(format!(
                "Unknown EMBEDDING_PROVIDER: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub default_model: String,
    pub dimension: usize,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub dataset_path: String,
    pub default_limit: u8,
    pub image_max_height_px: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8501,
            },
            store: StoreConfig {
                backend: StoreBackend::Postgres,
                postgres_url: "postgresql://localhost/cheese".to_string(),
                keyspace: "ks1".to_string(),
                table: "images".to_string(),
                max_connections: 4,
                connect_timeout: Duration::from_secs(10),
            },
            embedding: EmbeddingConfig {
                provider: EmbeddingProvider::OpenAi,
                base_url: "http://localhost:8080/v1".to_string(),
                api_key: None,
                default_model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
                dimension: 384,
                timeout: Duration::from_secs(30),
            },
            ui: UiConfig {
                dataset_path: "data/cheese_data.json".to_string(),
                default_limit: 3,
                image_max_height_px: 124,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. `from_env` is the
    /// process-environment case.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("CHEESE_HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("CHEESE_PORT") {
            config.server.port = parse_var("CHEESE_PORT", &port)?;
        }
        if let Some(backend) = lookup("STORE_BACKEND") {
            config.store.backend = backend.parse()?;
        }
        if let Some(postgres_url) = lookup("POSTGRES_URL") {
            config.store.postgres_url = postgres_url;
        }
        if let Some(keyspace) = lookup("STORE_KEYSPACE") {
            config.store.keyspace = keyspace;
        }
        if let Some(table) = lookup("STORE_TABLE") {
            config.store.table = table;
        }
        if let Some(max) = lookup("STORE_MAX_CONNECTIONS") {
            config.store.max_connections = parse_var("STORE_MAX_CONNECTIONS", &max)?;
        }
        if let Some(provider) = lookup("EMBEDDING_PROVIDER") {
            config.embedding.provider = provider.parse()?;
        }
        if let Some(url) = lookup("EMBEDDING_URL") {
            config.embedding.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = lookup("EMBEDDING_API_KEY") {
            config.embedding.api_key = Some(key).filter(|k| !k.is_empty());
        }
        if let Some(default_model) = lookup("DEFAULT_MODEL") {
            config.embedding.default_model = default_model;
        }
        if let Some(dimension) = lookup("EMBEDDING_DIMENSION") {
            config.embedding.dimension = parse_var("EMBEDDING_DIMENSION", &dimension)?;
        }
        if let Some(secs) = lookup("EMBEDDING_TIMEOUT_SECS") {
            config.embedding.timeout =
                Duration::from_secs(parse_var("EMBEDDING_TIMEOUT_SECS", &secs)?);
        }
        if let Some(path) = lookup("DATASET_PATH") {
            config.ui.dataset_path = path;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_identifier("STORE_KEYSPACE", &self.store.keyspace)?;
        validate_identifier("STORE_TABLE", &self.store.table)?;

        if self.embedding.dimension == 0 {
            return Err(SearchError::ConfigError(
                "EMBEDDING_DIMENSION must be positive".to_string(),
            ));
        }
        if !(crate::core::MIN_RESULT_LIMIT..=crate::core::MAX_RESULT_LIMIT)
            .contains(&self.ui.default_limit)
        {
            return Err(SearchError::ConfigError(format!(
                "Default limit {} outside {}..={}",
                self.ui.default_limit,
                crate::core::MIN_RESULT_LIMIT,
                crate::core::MAX_RESULT_LIMIT
            )));
        }
        Ok(())
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| SearchError::ConfigError(format!("Invalid {}: {}", name, e)))
}

/// Keyspace and table names end up in statement text, so only plain
/// identifiers are accepted.
pub fn validate_identifier(name: &str, value: &str) -> Result<()> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(SearchError::ConfigError(format!(
            "{} must match [A-Za-z_][A-Za-z0-9_]*, got {:?}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_demo_dataset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.store.keyspace, "ks1");
        assert_eq!(config.store.table, "images");
        assert_eq!(config.embedding.dimension, 384);
        assert_eq!(config.ui.default_limit, 3);
        assert_eq!(config.ui.image_max_height_px, 124);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("CHEESE_PORT", "9000"),
            ("STORE_BACKEND", "memory"),
            ("STORE_TABLE", "cheeses"),
            ("EMBEDDING_PROVIDER", "ollama"),
            ("EMBEDDING_URL", "http://ollama:11434/"),
            ("EMBEDDING_API_KEY", ""),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.table, "cheeses");
        assert_eq!(config.embedding.provider, EmbeddingProvider::Ollama);
        assert_eq!(config.embedding.base_url, "http://ollama:11434");
        assert!(config.embedding.api_key.is_none());
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("CHEESE_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, SearchError::ConfigError(_)));
    }

    #[test]
    fn test_rejects_injected_table_name() {
        let err = Config::from_lookup(lookup_from(&[("STORE_TABLE", "images; DROP TABLE x")]))
            .unwrap_err();
        assert!(matches!(err, SearchError::ConfigError(_)));
    }

    #[test]
    fn test_identifier_rules() {
        assert!(validate_identifier("t", "images").is_ok());
        assert!(validate_identifier("t", "_ks1").is_ok());
        assert!(validate_identifier("t", "1ks").is_err());
        assert!(validate_identifier("t", "").is_err());
        assert!(validate_identifier("t", "ks\"1").is_err());
    }
}
