//! Expression layer for WHERE conditions.
//!
//! `Expr` supports AND/OR/NOT grouping, comparisons, NULL checks, IN lists
//! and raw fragments. Placeholder indices are assigned while building, so
//! nested groups number their parameters in reading order.

use crate::qb::param::{Param, ParamList, SqlValue};

/// Expression node for building WHERE clauses.
#[derive(Clone, Debug)]
pub enum Expr {
    /// AND group: all conditions must be true.
    And(Vec<Expr>),

    /// OR group: at least one condition must be true.
    Or(Vec<Expr>),

    /// NOT: negate the inner expression.
    Not(Box<Expr>),

    /// Simple comparison: column op value
    Compare {
        column: String,
        op: &'static str,
        value: Param,
    },

    /// NULL check: column IS NULL or column IS NOT NULL
    NullCheck { column: String, is_null: bool },

    /// IN list: column IN (...) or column NOT IN (...)
    InList {
        column: String,
        values: Vec<Param>,
        negated: bool,
    },

    /// Raw SQL fragment without parameters.
    Raw(String),

    /// Always true (used for empty NOT IN lists).
    True,

    /// Always false (used for empty IN lists).
    False,
}

impl Expr {
    /// Create an AND expression from a list of expressions.
    pub fn and(exprs: Vec<Expr>) -> Self {
        Expr::And(exprs)
    }

    /// Create an OR expression from a list of expressions.
    pub fn or(exprs: Vec<Expr>) -> Self {
        Expr::Or(exprs)
    }

    /// Create a NOT expression.
    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    fn compare<T: SqlValue>(column: impl Into<String>, op: &'static str, value: T) -> Self {
        Expr::Compare {
            column: column.into(),
            op,
            value: Param::new(value),
        }
    }

    /// column = value
    pub fn eq<T: SqlValue>(column: impl Into<String>, value: T) -> Self {
        Self::compare(column, "=", value)
    }

    /// column != value
    pub fn ne<T: SqlValue>(column: impl Into<String>, value: T) -> Self {
        Self::compare(column, "!=", value)
    }

    /// column > value
    pub fn gt<T: SqlValue>(column: impl Into<String>, value: T) -> Self {
        Self::compare(column, ">", value)
    }

    /// column >= value
    pub fn gte<T: SqlValue>(column: impl Into<String>, value: T) -> Self {
        Self::compare(column, ">=", value)
    }

    /// column < value
    pub fn lt<T: SqlValue>(column: impl Into<String>, value: T) -> Self {
        Self::compare(column, "<", value)
    }

    /// column <= value
    pub fn lte<T: SqlValue>(column: impl Into<String>, value: T) -> Self {
        Self::compare(column, "<=", value)
    }

    /// column LIKE pattern
    pub fn like<T: SqlValue>(column: impl Into<String>, pattern: T) -> Self {
        Self::compare(column, "LIKE", pattern)
    }

    /// column IS NULL
    pub fn is_null(column: impl Into<String>) -> Self {
        Expr::NullCheck {
            column: column.into(),
            is_null: true,
        }
    }

    /// column IS NOT NULL
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Expr::NullCheck {
            column: column.into(),
            is_null: false,
        }
    }

    /// column IN (values...); an empty list is always false.
    pub fn in_list<T: SqlValue>(column: impl Into<String>, values: Vec<T>) -> Self {
        if values.is_empty() {
            return Expr::False;
        }
        Expr::InList {
            column: column.into(),
            values: values.into_iter().map(Param::new).collect(),
            negated: false,
        }
    }

    /// column NOT IN (values...); an empty list is always true.
    pub fn not_in<T: SqlValue>(column: impl Into<String>, values: Vec<T>) -> Self {
        if values.is_empty() {
            return Expr::True;
        }
        Expr::InList {
            column: column.into(),
            values: values.into_iter().map(Param::new).collect(),
            negated: true,
        }
    }

    /// Create a raw SQL fragment.
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    /// Check if this expression is empty (contains no conditions).
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::And(exprs) | Expr::Or(exprs) => exprs.iter().all(|e| e.is_empty()),
            Expr::Not(inner) => inner.is_empty(),
            _ => false,
        }
    }

    /// Build the SQL fragment, binding values into `params`.
    pub fn build(&self, params: &mut ParamList) -> String {
        match self {
            Expr::And(exprs) => Self::build_group(exprs, " AND ", params),
            Expr::Or(exprs) => Self::build_group(exprs, " OR ", params),
            Expr::Not(inner) => {
                let inner_sql = inner.build(params);
                if inner_sql.is_empty() {
                    String::new()
                } else {
                    format!("NOT ({})", inner_sql)
                }
            }
            Expr::Compare { column, op, value } => {
                format!("{} {} {}", column, op, params.bind(value))
            }
            Expr::NullCheck { column, is_null } => {
                if *is_null {
                    format!("{} IS NULL", column)
                } else {
                    format!("{} IS NOT NULL", column)
                }
            }
            Expr::InList {
                column,
                values,
                negated,
            } => {
                let items: Vec<String> = values.iter().map(|v| params.bind(v)).collect();
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{} {} ({})", column, op, items.join(", "))
            }
            Expr::Raw(sql) => sql.clone(),
            Expr::True => "1=1".to_string(),
            Expr::False => "1=0".to_string(),
        }
    }

    fn build_group(exprs: &[Expr], sep: &str, params: &mut ParamList) -> String {
        let members: Vec<&Expr> = exprs.iter().filter(|e| !e.is_empty()).collect();
        let combined = members.len() > 1;
        let parts: Vec<String> = members
            .into_iter()
            .map(|e| {
                let sql = e.build(params);
                // Nested groups and raw fragments keep their own precedence.
                let needs_parens = match e {
                    Expr::And(inner) | Expr::Or(inner) => inner.len() > 1,
                    Expr::Raw(raw) => combined && !raw.trim().is_empty(),
                    _ => false,
                };
                if needs_parens {
                    format!("({})", sql)
                } else {
                    sql
                }
            })
            .collect();
        parts.join(sep)
    }
}

/// An implicit AND group used by builders for their WHERE clause.
#[derive(Clone, Debug, Default)]
pub struct ExprGroup {
    exprs: Vec<Expr>,
}

impl ExprGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self { exprs: Vec::new() }
    }

    /// Append an expression.
    pub fn push(&mut self, expr: Expr) {
        self.exprs.push(expr);
    }

    /// Whether the group has no effective conditions.
    pub fn is_empty(&self) -> bool {
        self.exprs.iter().all(|e| e.is_empty())
    }

    /// Build the AND-joined fragment (empty string when there are no conditions).
    pub fn build(&self, params: &mut ParamList) -> String {
        Expr::build_group(&self.exprs, " AND ", params)
    }
}
