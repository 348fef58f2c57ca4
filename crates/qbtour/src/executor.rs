//! Executor: turns a query description into a database round-trip.
//!
//! Each call opens its own connection from the stored [`DbConfig`] instead of
//! borrowing from the shared pool. Both are configured identically, so a
//! description executed here sees the same database as the pooled handlers,
//! only over a separate session.

use crate::client::GenericClient;
use crate::config::DbConfig;
use crate::error::OrmResult;
use crate::pool::connect_single;
use crate::qb::SqlQb;
use crate::row::FromRow;
use tokio_postgres::Row;

/// Runs query descriptions on fresh connections.
#[derive(Clone, Debug)]
pub struct Executor {
    config: DbConfig,
}

impl Executor {
    /// Create an executor for the given database.
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    /// The configuration each execution connects with.
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Serialize `query`, run it on a new connection and return its rows.
    ///
    /// Errors from validation, connecting, or running the statement are
    /// returned unchanged.
    pub async fn execute(&self, query: &impl SqlQb) -> OrmResult<Vec<Row>> {
        let built = query.build()?;
        tracing::debug!(sql = %query.to_inline_sql(), "executing query description");

        let client = connect_single(&self.config).await?;
        let rows = GenericClient::query(&client, &built.sql, &built.params_ref()).await?;
        tracing::debug!(rows = rows.len(), "query description finished");
        Ok(rows)
    }

    /// Like [`Executor::execute`], mapping each row to `T`.
    pub async fn execute_as<T: FromRow>(&self, query: &impl SqlQb) -> OrmResult<Vec<T>> {
        let rows = self.execute(query).await?;
        rows.iter().map(T::from_row).collect()
    }
}
