//! UPDATE query builder.

use crate::error::{OrmError, OrmResult};
use crate::qb::expr::{Expr, ExprGroup};
use crate::qb::param::{Param, ParamList, SqlValue};
use crate::qb::traits::{MutationQb, SqlQb, impl_display_as_inline_sql};

/// SET field value type.
#[derive(Clone, Debug)]
enum SetField {
    /// Parameterized value
    Value(Param),
    /// Raw SQL expression
    Raw(String),
}

/// UPDATE query builder.
#[derive(Clone, Debug)]
pub struct UpdateQb {
    /// Table name
    table: String,
    /// SET clauses
    set_fields: Vec<(String, SetField)>,
    /// WHERE conditions
    where_group: ExprGroup,
    /// RETURNING columns
    returning_cols: Vec<String>,
}

impl UpdateQb {
    /// Create a new UPDATE query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            set_fields: Vec::new(),
            where_group: ExprGroup::new(),
            returning_cols: Vec::new(),
        }
    }

    /// Set a column value.
    pub fn set<T: SqlValue>(mut self, column: &str, value: T) -> Self {
        self.set_fields
            .push((column.to_string(), SetField::Value(Param::new(value))));
        self
    }

    /// Set a raw SQL expression.
    pub fn set_raw(mut self, column: &str, expr: &str) -> Self {
        self.set_fields
            .push((column.to_string(), SetField::Raw(expr.to_string())));
        self
    }

    /// Add WHERE: column = value
    pub fn eq<T: SqlValue>(mut self, column: &str, value: T) -> Self {
        self.where_group.push(Expr::eq(column, value));
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

impl SqlQb for UpdateQb {
    fn render(&self, params: &mut ParamList) -> String {
        let sets: Vec<String> = self
            .set_fields
            .iter()
            .map(|(col, field)| match field {
                SetField::Value(p) => format!("{} = {}", col, params.bind(p)),
                SetField::Raw(expr) => format!("{} = {}", col, expr),
            })
            .collect();

        let mut sql = format!("UPDATE {} SET {}", self.table, sets.join(", "));

        let where_sql = self.where_group.build(params);
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if !self.returning_cols.is_empty() {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.returning_cols.join(", "));
        }

        sql
    }

    fn validate(&self) -> OrmResult<()> {
        if self.set_fields.is_empty() {
            return Err(OrmError::validation(format!(
                "UpdateQb: UPDATE {} requires at least one SET",
                self.table
            )));
        }
        Ok(())
    }
}

impl MutationQb for UpdateQb {}

impl_display_as_inline_sql!(UpdateQb);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_by_id() {
        let qb = UpdateQb::new("users")
            .set("email", "johnnyboy@gmail.com")
            .eq("id", 1i32);
        assert_eq!(qb.to_sql(), "UPDATE users SET email = $1 WHERE id = $2");
        assert_eq!(
            qb.to_string(),
            "UPDATE users SET email = 'johnnyboy@gmail.com' WHERE id = 1"
        );
    }

    #[test]
    fn update_with_raw_and_returning() {
        let qb = UpdateQb::new("users")
            .set_raw("details", "DEFAULT")
            .eq("id", 2i32)
            .returning("id");
        assert_eq!(
            qb.to_sql(),
            "UPDATE users SET details = DEFAULT WHERE id = $1 RETURNING id"
        );
    }

    #[test]
    fn update_requires_set() {
        assert!(UpdateQb::new("users").eq("id", 1i32).build().is_err());
    }
}
