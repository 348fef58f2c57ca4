//! # qbtour
//!
//! A guided tour of a PostgreSQL query builder, exposed by `qbtour-server` as
//! one HTTP route per demonstrated operation.
//!
//! ## Pieces
//!
//! - **Connection provider**: [`create_pool`] / [`connect_pool`] for the shared
//!   pool, [`connect_single`] for a dedicated connection
//! - **Query builder**: [`qb`], with [`qb::get_builder`] as the façade that
//!   returns an unexecuted description scoped to one table
//! - **Executor**: [`Executor::execute`] runs a description on a fresh
//!   connection
//! - **Schema**: [`schema`] renders CREATE/DROP/ALTER TABLE
//! - **Transactions**: [`transaction!`] commits on `Ok`, rolls back on `Err`
//!
//! ```ignore
//! use qbtour::qb::{self, SqlQb};
//!
//! let user2 = qb::get_builder("users").eq("id", 2);
//! assert_eq!(user2.to_sql(), "SELECT * FROM users WHERE id = $1");
//! assert_eq!(user2.to_string(), "SELECT * FROM users WHERE id = 2");
//!
//! let executor = qbtour::Executor::new(config);
//! let users: Vec<qbtour::models::User> = executor.execute_as(&user2).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod ident;
pub mod models;
pub mod pool;
pub mod qb;
pub mod row;
pub mod schema;
pub mod tour;
pub mod transaction;

pub use client::GenericClient;
pub use config::DbConfig;
pub use error::{OrmError, OrmResult};
pub use executor::Executor;
pub use pool::{connect_pool, connect_single, create_pool};
pub use row::{FromRow, RowExt};

// Re-export deadpool so callers name the same pool types.
pub use deadpool_postgres;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
