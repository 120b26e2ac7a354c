//! Search mode selection and parameterized query construction

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::{validate_identifier, StoreConfig};
use crate::core::{QueryInput, Result, SearchError};

/// Columns every search selects, in display order.
pub const RESULT_COLUMNS: [&str; 4] = ["name", "aroma", "country_origin", "image"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Similarity ranking restricted by a description keyword.
    VectorKeyword,
    /// Similarity ranking only.
    VectorOnly,
}

impl SearchMode {
    /// Picks the mode for an input, or `None` when nothing should run.
    pub fn select(input: &QueryInput) -> Option<Self> {
        match (input.name(), input.description()) {
            (None, _) => None,
            (Some(_), Some(_)) => Some(SearchMode::VectorKeyword),
            (Some(_), None) => Some(SearchMode::VectorOnly),
        }
    }
}

/// A fully bound search. User-provided values only ever travel as bind
/// parameters; the statement text is built from validated identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub mode: SearchMode,
    pub keyspace: String,
    pub table: String,
    pub embedding: Vec<f32>,
    pub keyword: Option<String>,
    pub limit: u8,
}

impl SearchQuery {
    /// pgvector statement text. Binds: `$1` embedding as `real[]`, then the
    /// escaped keyword pattern for keyword mode, then the limit.
    pub fn to_sql(&self) -> String {
        let columns = RESULT_COLUMNS.join(", ");
        let source = format!("\"{}\".\"{}\"", self.keyspace, self.table);

        match self.mode {
            SearchMode::VectorOnly => format!(
                "SELECT {} FROM {} ORDER BY item_vector <=> $1::real[]::vector LIMIT $2",
                columns, source
            ),
            SearchMode::VectorKeyword => format!(
                "SELECT {} FROM {} WHERE description ILIKE '%' || $2 || '%' ESCAPE '\\' \
                 ORDER BY item_vector <=> $1::real[]::vector LIMIT $3",
                columns, source
            ),
        }
    }

    /// Keyword with LIKE wildcards escaped, ready to bind.
    pub fn keyword_pattern(&self) -> Option<String> {
        self.keyword.as_deref().map(escape_like)
    }

    /// Case-insensitive substring match, the same semantics `to_sql` gives.
    pub fn keyword_matches(&self, description: &str) -> bool {
        match &self.keyword {
            Some(keyword) => description
                .to_lowercase()
                .contains(&keyword.to_lowercase()),
            None => true,
        }
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    keyspace: String,
    table: String,
    dimension: usize,
}

impl QueryBuilder {
    pub fn new(store: &StoreConfig, dimension: usize) -> Result<Self> {
        validate_identifier("keyspace", &store.keyspace)?;
        validate_identifier("table", &store.table)?;

        Ok(Self {
            keyspace: store.keyspace.clone(),
            table: store.table.clone(),
            dimension,
        })
    }

    /// Builds the query for `input`. Returns `Ok(None)` when the name is
    /// blank, whatever the description says.
    pub fn build(&self, input: &QueryInput, embedding: Vec<f32>) -> Result<Option<SearchQuery>> {
        input.validate()?;

        let Some(mode) = SearchMode::select(input) else {
            return Ok(None);
        };

        if embedding.len() != self.dimension {
            return Err(SearchError::EmbeddingFailure(format!(
                "expected a {}-dimension vector, got {}",
                self.dimension,
                embedding.len()
            )));
        }

        let keyword = match mode {
            SearchMode::VectorKeyword => input.description().map(str::to_string),
            SearchMode::VectorOnly => None,
        };

        debug!(?mode, limit = input.result_limit, "Built search query");

        Ok(Some(SearchQuery {
            mode,
            keyspace: self.keyspace.clone(),
            table: self.table.clone(),
            embedding,
            keyword,
            limit: input.result_limit,
        }))
    }
}
