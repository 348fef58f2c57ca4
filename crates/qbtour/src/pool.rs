//! Connection provider: the shared pool and dedicated single connections.

use crate::config::DbConfig;
use crate::error::{OrmError, OrmResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

/// Create a connection pool from [`DbConfig`].
///
/// No connection is opened here; use [`connect_pool`] to fail fast when the
/// database is unreachable. A zero `pool_size` is a validation error.
pub fn create_pool(config: &DbConfig) -> OrmResult<Pool> {
    config.validate()?;
    let mgr = Manager::from_config(config.to_pg_config()?, NoTls, default_manager_config());
    Pool::builder(mgr)
        .max_size(config.pool_size)
        .build()
        .map_err(|e| OrmError::Pool(e.to_string()))
}

/// Create the pool and check out one connection right away.
///
/// This is the shared handle passed to every request handler. There is no
/// retry: an unreachable database is reported to the caller.
pub async fn connect_pool(config: &DbConfig) -> OrmResult<Pool> {
    let pool = create_pool(config)?;
    let client = pool.get().await?;
    drop(client);
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        "connected to database"
    );
    Ok(pool)
}

/// Open one dedicated connection outside the pool.
///
/// The connection task is spawned onto the current runtime and ends when the
/// returned client is dropped.
pub async fn connect_single(config: &DbConfig) -> OrmResult<tokio_postgres::Client> {
    let (client, connection) = config
        .to_pg_config()?
        .connect(NoTls)
        .await
        .map_err(|e| OrmError::Connection(e.to_string()))?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!(error = %e, "database connection error");
        }
    });
    Ok(client)
}

fn default_manager_config() -> ManagerConfig {
    ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_pool_is_lazy_and_sized_from_config() {
        let mut config = DbConfig::default();
        config.pool_size = 3;
        let pool = create_pool(&config).unwrap();
        assert_eq!(pool.status().max_size, 3);
        assert_eq!(pool.status().size, 0);
    }

    #[test]
    fn create_pool_rejects_zero_slots() {
        let mut config = DbConfig::default();
        config.pool_size = 0;
        let err = create_pool(&config).unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn connect_pool_with_zero_slots_returns_instead_of_waiting() {
        let mut config = DbConfig::default();
        config.pool_size = 0;
        let result =
            tokio::time::timeout(std::time::Duration::from_secs(3), connect_pool(&config)).await;
        let err = result.expect("connect_pool must not wait on an empty pool").unwrap_err();
        assert!(err.is_validation());
    }
}
