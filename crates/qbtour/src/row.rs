//! Row mapping traits and utilities

use crate::error::{OrmError, OrmResult};
use tokio_postgres::Row;

/// Trait for types that can be constructed from a database row.
///
/// # Example
///
/// ```ignore
/// use qbtour::{FromRow, OrmResult, RowExt};
///
/// struct Greeting {
///     id: i32,
///     text: String,
/// }
///
/// impl FromRow for Greeting {
///     fn from_row(row: &tokio_postgres::Row) -> OrmResult<Self> {
///         Ok(Self {
///             id: row.try_get_column("id")?,
///             text: row.try_get_column("text")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Construct an instance from a database row
    fn from_row(row: &Row) -> OrmResult<Self>;
}

/// Extension trait for Row to provide convenient column access
pub trait RowExt {
    /// Get a column value by name with error handling
    fn try_get_column<T>(&self, column: &str) -> OrmResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;

    /// Get a column value by name, or `None` when the row has no such column.
    ///
    /// Useful for columns added by `ALTER TABLE` that earlier row sets may not carry.
    fn try_get_optional_column<T>(&self, column: &str) -> OrmResult<Option<T>>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> OrmResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| OrmError::decode(column, e.to_string()))
    }

    fn try_get_optional_column<T>(&self, column: &str) -> OrmResult<Option<T>>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        if self.columns().iter().any(|c| c.name() == column) {
            self.try_get_column::<Option<T>>(column)
        } else {
            Ok(None)
        }
    }
}

/// Single-column rows map to their scalar value.
impl FromRow for i32 {
    fn from_row(row: &Row) -> OrmResult<Self> {
        row.try_get(0).map_err(|e| OrmError::decode("0", e.to_string()))
    }
}
