//! Repository layer for database operations

pub mod executor;
pub mod visitors;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::error::{AppError, AppResult};
use executor::{PgExecutor, QueryExecutor};

/// Main repository struct holding the query executor
#[derive(Clone)]
pub struct Repository {
    executor: Arc<dyn QueryExecutor>,
    pub visitors: visitors::VisitorsRepository,
}

impl Repository {
    /// Create a new repository issuing statements through `executor`
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            visitors: visitors::VisitorsRepository::new(executor.clone()),
            executor,
        }
    }

    /// Create a new repository with the given database pool
    pub fn from_pool(pool: Pool<Postgres>) -> Self {
        Self::new(Arc::new(PgExecutor::new(pool)))
    }

    /// Round-trip a trivial statement to check store connectivity
    pub async fn ping(&self) -> AppResult<()> {
        self.executor
            .execute("SELECT 1", &[])
            .await
            .map_err(AppError::store("Database unreachable"))?;
        Ok(())
    }
}
