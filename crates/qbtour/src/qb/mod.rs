//! Query builder (qb) and the query description façade.
//!
//! Builders are plain values describing a statement. Nothing here touches
//! the network until a `fetch_*`/`execute` method is awaited, or the
//! description is handed to an [`Executor`](crate::executor::Executor).
//!
//! Two serializations are available for every builder:
//!
//! - [`SqlQb::to_sql`]: parameterized text (`$1`, `$2`, ...), what is sent to
//!   the server together with the bound values
//! - `Display` / [`SqlQb::to_inline_sql`]: values inlined as escaped
//!   literals, for logs and inspection
//!
//! # Usage
//!
//! ```ignore
//! use qbtour::qb::{self, SqlQb};
//!
//! // Façade: a description scoped to one table.
//! let list = qb::get_builder("users");
//! let user2 = qb::get_builder("users").eq("id", 2);
//! assert_eq!(user2.to_string(), "SELECT * FROM users WHERE id = 2");
//!
//! // INSERT
//! qb::insert("users")
//!     .set("name", "Bam bam")
//!     .set("email", "bam@bam.com")
//!     .execute(&client)
//!     .await?;
//!
//! // DELETE
//! qb::delete("users").eq("id", user_id).execute(&client).await?;
//! ```

mod delete;
mod expr;
mod insert;
mod param;
mod select;
mod traits;
mod update;

pub use delete::DeleteQb;
pub use expr::{Expr, ExprGroup};
pub use insert::{InsertQb, InsertRow};
pub use param::{Param, ParamList, RenderMode, SqlValue, quote_literal};
pub use select::SelectQb;
pub use traits::{BuiltQuery, MutationQb, SqlQb};
pub use update::UpdateQb;

/// Return an unexecuted SELECT description scoped to `table`.
///
/// The description starts as `SELECT * FROM <table>` and can be narrowed
/// with chained predicates. Building it performs no I/O.
pub fn get_builder(table: &str) -> SelectQb {
    SelectQb::new(table)
}

/// Create a SELECT query builder for the given table.
pub fn select(table: &str) -> SelectQb {
    SelectQb::new(table)
}

/// Create an INSERT query builder for the given table.
pub fn insert(table: &str) -> InsertQb {
    InsertQb::new(table)
}

/// Create an UPDATE query builder for the given table.
pub fn update(table: &str) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE query builder for the given table.
///
/// Without WHERE conditions the statement renders as a no-op (`WHERE 1=0`)
/// unless `allow_delete_all(true)` is set.
pub fn delete(table: &str) -> DeleteQb {
    DeleteQb::new(table)
}

#[cfg(test)]
mod tests;
