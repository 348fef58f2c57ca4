//! DELETE query builder.

use crate::qb::expr::{Expr, ExprGroup};
use crate::qb::param::{ParamList, SqlValue};
use crate::qb::traits::{MutationQb, SqlQb, impl_display_as_inline_sql};

/// DELETE query builder.
#[derive(Clone, Debug)]
pub struct DeleteQb {
    /// Table name
    table: String,
    /// WHERE conditions
    where_group: ExprGroup,
    /// RETURNING columns
    returning_cols: Vec<String>,
    /// Whether to allow DELETE without WHERE
    allow_delete_all: bool,
}

impl DeleteQb {
    /// Create a new DELETE query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_group: ExprGroup::new(),
            returning_cols: Vec::new(),
            allow_delete_all: false,
        }
    }

    /// Allow DELETE without WHERE conditions.
    ///
    /// By default, DELETE without WHERE generates `WHERE 1=0` (no-op).
    pub fn allow_delete_all(mut self, allow: bool) -> Self {
        self.allow_delete_all = allow;
        self
    }

    /// Add WHERE: column = value
    pub fn eq<T: SqlValue>(mut self, column: &str, value: T) -> Self {
        self.where_group.push(Expr::eq(column, value));
        self
    }

    /// Add WHERE: column IN (values...)
    pub fn in_list<T: SqlValue>(mut self, column: &str, values: Vec<T>) -> Self {
        self.where_group.push(Expr::in_list(column, values));
        self
    }

    /// Add a custom expression.
    pub fn and_expr(mut self, expr: Expr) -> Self {
        self.where_group.push(expr);
        self
    }

    /// Set RETURNING columns.
    pub fn returning(mut self, cols: &str) -> Self {
        self.returning_cols = vec![cols.to_string()];
        self
    }
}

impl SqlQb for DeleteQb {
    fn render(&self, params: &mut ParamList) -> String {
        let mut sql = format!("DELETE FROM {}", self.table);

        if self.where_group.is_empty() {
            if !self.allow_delete_all {
                sql.push_str(" WHERE 1=0");
            }
        } else {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_group.build(params));
        }

        if !self.returning_cols.is_empty() {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.returning_cols.join(", "));
        }

        sql
    }
}

impl MutationQb for DeleteQb {}

impl_display_as_inline_sql!(DeleteQb);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_by_id_returning() {
        let qb = DeleteQb::new("users").eq("id", 1i32).returning("id");
        assert_eq!(qb.to_sql(), "DELETE FROM users WHERE id = $1 RETURNING id");
    }

    #[test]
    fn delete_without_where_is_a_no_op() {
        assert_eq!(DeleteQb::new("users").to_sql(), "DELETE FROM users WHERE 1=0");
        assert_eq!(
            DeleteQb::new("users").allow_delete_all(true).to_sql(),
            "DELETE FROM users"
        );
    }
}
