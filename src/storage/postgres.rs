//! PostgreSQL search store using pgvector

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use tracing::{debug, warn};

use crate::core::config::StoreConfig;
use crate::core::query::RESULT_COLUMNS;
use crate::core::{Result, SearchQuery};
use crate::storage::{SearchStore, StoreRow};

/// Expects a table shaped like
///
/// ```sql
/// CREATE TABLE ks1.images (
///     name TEXT, aroma TEXT, country_origin TEXT, image TEXT,
///     description TEXT, item_vector vector(384)
/// );
/// ```
///
/// already populated.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Builds the pool without opening a connection, so the page still
    /// renders when the database is down.
    pub fn connect_lazy(config: &StoreConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_lazy(&config.postgres_url)?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SearchStore for PostgresStore {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn execute(&self, query: &SearchQuery) -> Result<Vec<StoreRow>> {
        let sql = query.to_sql();
        debug!(mode = ?query.mode, limit = query.limit, "Executing pgvector search");

        let mut statement = sqlx::query(&sql).bind(query.embedding.as_slice());
        if let Some(pattern) = query.keyword_pattern() {
            statement = statement.bind(pattern);
        }
        statement = statement.bind(i64::from(query.limit));

        let rows = statement.fetch_all(&self.pool).await.map_err(|e| {
            warn!("pgvector search failed: {}", e);
            e
        })?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let mut store_row = StoreRow::new();
            for column in RESULT_COLUMNS {
                // A missing or mistyped column reads as NULL; the formatter
                // reports it as a malformed row.
                let value = row.try_get::<Option<String>, _>(column).ok().flatten();
                store_row.insert(column, value);
            }
            results.push(store_row);
        }

        Ok(results)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
