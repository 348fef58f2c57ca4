//! SELECT query builder.

use crate::qb::expr::{Expr, ExprGroup};
use crate::qb::param::{ParamList, SqlValue};
use crate::qb::traits::{SqlQb, impl_display_as_inline_sql};

/// SELECT query builder.
///
/// Every method consumes the builder and returns the narrowed description;
/// clones taken along the way are independent.
#[derive(Clone, Debug)]
pub struct SelectQb {
    /// Table or FROM expression
    from_expr: String,
    /// SELECT columns (default ["*"])
    select_cols: Vec<String>,
    /// JOIN clauses
    join_clauses: Vec<String>,
    /// WHERE conditions
    where_group: ExprGroup,
    /// ORDER BY clauses
    order_clauses: Vec<String>,
    /// LIMIT
    limit: Option<i64>,
    /// OFFSET
    offset: Option<i64>,
}

impl SelectQb {
    /// Create a new SELECT query builder for a table (or FROM expression).
    pub fn new(table: &str) -> Self {
        Self {
            from_expr: table.to_string(),
            select_cols: vec!["*".to_string()],
            join_clauses: Vec::new(),
            where_group: ExprGroup::new(),
            order_clauses: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// The FROM expression this description is scoped to.
    pub fn table(&self) -> &str {
        &self.from_expr
    }

    // ==================== SELECT columns ====================

    /// Set SELECT columns (string form, supports complex expressions).
    pub fn select(mut self, cols: &str) -> Self {
        self.select_cols = vec![cols.to_string()];
        self
    }

    /// Set SELECT columns (array form).
    pub fn select_cols(mut self, cols: &[&str]) -> Self {
        self.select_cols = cols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Append one `expr AS "alias"` projection.
    pub fn select_as(mut self, expr: &str, alias: &str) -> Self {
        let col = format!("{} AS \"{}\"", expr, alias.replace('"', "\"\""));
        if self.select_cols.len() == 1 && self.select_cols[0] == "*" {
            self.select_cols[0] = col;
        } else {
            self.select_cols.push(col);
        }
        self
    }

    // ==================== JOIN ====================

    /// Add INNER JOIN on `left = right`.
    pub fn inner_join(mut self, table: &str, left: &str, right: &str) -> Self {
        self.join_clauses
            .push(format!("INNER JOIN {} ON {} = {}", table, left, right));
        self
    }

    /// Add LEFT JOIN on `left = right`.
    pub fn left_join(mut self, table: &str, left: &str, right: &str) -> Self {
        self.join_clauses
            .push(format!("LEFT JOIN {} ON {} = {}", table, left, right));
        self
    }

    // ==================== WHERE conditions ====================

    /// Add WHERE: column = value
    pub fn eq<T: SqlValue>(mut self, column: &str, value: T) -> Self {
        self.where_group.push(Expr::eq(column, value));
        self
    }

    /// Add WHERE: column != value
    pub fn ne<T: SqlValue>(mut self, column: &str, value: T) -> Self {
        self.where_group.push(Expr::ne(column, value));
        self
    }

    /// Add WHERE: column > value
    pub fn gt<T: SqlValue>(mut self, column: &str, value: T) -> Self {
        self.where_group.push(Expr::gt(column, value));
        self
    }

    /// Add WHERE: column >= value
    pub fn gte<T: SqlValue>(mut self, column: &str, value: T) -> Self {
        self.where_group.push(Expr::gte(column, value));
        self
    }

    /// Add WHERE: column < value
    pub fn lt<T: SqlValue>(mut self, column: &str, value: T) -> Self {
        self.where_group.push(Expr::lt(column, value));
        self
    }

    /// Add WHERE: column <= value
    pub fn lte<T: SqlValue>(mut self, column: &str, value: T) -> Self {
        self.where_group.push(Expr::lte(column, value));
        self
    }

    /// Add WHERE: column LIKE pattern
    pub fn like<T: SqlValue>(mut self, column: &str, pattern: T) -> Self {
        self.where_group.push(Expr::like(column, pattern));
        self
    }

    /// Add WHERE: column IS NULL
    pub fn is_null(mut self, column: &str) -> Self {
        self.where_group.push(Expr::is_null(column));
        self
    }

    /// Add WHERE: column IS NOT NULL
    pub fn is_not_null(mut self, column: &str) -> Self {
        self.where_group.push(Expr::is_not_null(column));
        self
    }

    /// Add WHERE: column IN (values...)
    pub fn in_list<T: SqlValue>(mut self, column: &str, values: Vec<T>) -> Self {
        self.where_group.push(Expr::in_list(column, values));
        self
    }

    /// Add a raw WHERE condition without params.
    pub fn raw(mut self, sql: &str) -> Self {
        self.where_group.push(Expr::raw(sql));
        self
    }

    /// Add a custom expression.
    pub fn and_expr(mut self, expr: Expr) -> Self {
        self.where_group.push(expr);
        self
    }

    // ==================== Ordering & pagination ====================

    /// Add ORDER BY clause.
    pub fn order_by(mut self, clause: &str) -> Self {
        self.order_clauses.push(clause.to_string());
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }
}

impl SqlQb for SelectQb {
    fn render(&self, params: &mut ParamList) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.select_cols.join(", "),
            self.from_expr
        );

        for join in &self.join_clauses {
            sql.push(' ');
            sql.push_str(join);
        }

        let where_sql = self.where_group.build(params);
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if !self.order_clauses.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_clauses.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        sql
    }
}

impl_display_as_inline_sql!(SelectQb);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_select() {
        let qb = SelectQb::new("users");
        assert_eq!(qb.to_sql(), "SELECT * FROM users");
    }

    #[test]
    fn test_select_with_columns() {
        let qb = SelectQb::new("users").select("id");
        assert_eq!(qb.to_sql(), "SELECT id FROM users");
    }

    #[test]
    fn test_select_with_where() {
        let qb = SelectQb::new("users").eq("name", "John Doe").gt("id", 1i32);
        assert_eq!(qb.to_sql(), "SELECT * FROM users WHERE name = $1 AND id > $2");
        assert_eq!(
            qb.to_string(),
            "SELECT * FROM users WHERE name = 'John Doe' AND id > 1"
        );
    }

    #[test]
    fn test_select_with_join() {
        let qb = SelectQb::new("useraddress").inner_join(
            "users",
            "useraddress.user_id",
            "users.id",
        );
        assert_eq!(
            qb.to_sql(),
            "SELECT * FROM useraddress INNER JOIN users ON useraddress.user_id = users.id"
        );
    }

    #[test]
    fn test_select_as_replaces_star() {
        let qb = SelectQb::new("users")
            .select_as("users.id", "userId")
            .select_as("useraddress.address", "address")
            .left_join("useraddress", "users.id", "useraddress.user_id");
        assert_eq!(
            qb.to_sql(),
            "SELECT users.id AS \"userId\", useraddress.address AS \"address\" FROM users \
             LEFT JOIN useraddress ON users.id = useraddress.user_id"
        );
    }

    #[test]
    fn test_select_with_order_and_limit() {
        let qb = SelectQb::new("users").order_by("id").limit(1).offset(2);
        assert_eq!(qb.to_sql(), "SELECT * FROM users ORDER BY id LIMIT 1 OFFSET 2");
    }
}
