//! INSERT query builder with single- and multi-row VALUES.

use crate::error::{OrmError, OrmResult};
use crate::qb::param::{Param, ParamList, SqlValue};
use crate::qb::traits::{MutationQb, SqlQb, impl_display_as_inline_sql};

/// One row of column/value pairs for an INSERT.
#[derive(Clone, Debug, Default)]
pub struct InsertRow {
    columns: Vec<String>,
    values: Vec<Param>,
}

impl InsertRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value.
    pub fn set<T: SqlValue>(mut self, column: &str, value: T) -> Self {
        self.columns.push(column.to_string());
        self.values.push(Param::new(value));
        self
    }
}

/// INSERT query builder.
///
/// Rows are rendered as one multi-row `VALUES` list, so a batch is a single
/// statement. All rows must name the same columns in the same order.
#[derive(Clone, Debug)]
pub struct InsertQb {
    /// Table name
    table: String,
    /// Rows to insert (the first row defines the column list)
    rows: Vec<InsertRow>,
    /// RETURNING columns
    returning_cols: Vec<String>,
}

impl InsertQb {
    /// Create a new INSERT query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            rows: Vec::new(),
            returning_cols: Vec::new(),
        }
    }

    /// Set a column value on the first row (single-row form).
    pub fn set<T: SqlValue>(mut self, column: &str, value: T) -> Self {
        match self.rows.first_mut() {
            Some(row) => {
                let taken = std::mem::take(row);
                *row = taken.set(column, value);
            }
            None => self.rows.push(InsertRow::new().set(column, value)),
        }
        self
    }

    /// Append one row.
    pub fn row(mut self, row: InsertRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Append several rows.
    pub fn rows(mut self, rows: impl IntoIterator<Item = InsertRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Set RETURNING columns.
    pub fn returning(mut self, cols: &str) -> Self {
        self.returning_cols = vec![cols.to_string()];
        self
    }
}

impl SqlQb for InsertQb {
    fn render(&self, params: &mut ParamList) -> String {
        let mut sql = match self.rows.first() {
            None => format!("INSERT INTO {} DEFAULT VALUES", self.table),
            Some(first) => {
                let tuples: Vec<String> = self
                    .rows
                    .iter()
                    .map(|row| {
                        let values: Vec<String> =
                            row.values.iter().map(|v| params.bind(v)).collect();
                        format!("({})", values.join(", "))
                    })
                    .collect();
                format!(
                    "INSERT INTO {} ({}) VALUES {}",
                    self.table,
                    first.columns.join(", "),
                    tuples.join(", ")
                )
            }
        };

        if !self.returning_cols.is_empty() {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.returning_cols.join(", "));
        }

        sql
    }

    fn validate(&self) -> OrmResult<()> {
        let Some(first) = self.rows.first() else {
            return Ok(());
        };
        if first.columns.is_empty() {
            return Err(OrmError::validation(format!(
                "InsertQb: row 1 for '{}' has no columns",
                self.table
            )));
        }
        for (i, row) in self.rows.iter().enumerate().skip(1) {
            if row.columns != first.columns {
                return Err(OrmError::validation(format!(
                    "InsertQb: row {} for '{}' has columns ({}) but row 1 has ({})",
                    i + 1,
                    self.table,
                    row.columns.join(", "),
                    first.columns.join(", ")
                )));
            }
        }
        Ok(())
    }
}

impl MutationQb for InsertQb {}

impl_display_as_inline_sql!(InsertQb);
