//! Bound values for query builders.
//!
//! Every value carries two renderings: the `ToSql` payload sent to the
//! server with a `$n` placeholder, and an escaped SQL literal used when the
//! description is displayed as plain text.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A value that can be bound to a query and rendered as a SQL literal.
pub trait SqlValue: ToSql + Send + Sync + 'static {
    /// Render the value as an inline SQL literal.
    fn to_literal(&self) -> String;
}

/// Quote a string as a SQL literal, doubling embedded single quotes.
pub fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

macro_rules! impl_numeric_value {
    ($($ty:ty),*) => {
        $(
            impl SqlValue for $ty {
                fn to_literal(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_numeric_value!(i16, i32, i64, f32, f64);

impl SqlValue for bool {
    fn to_literal(&self) -> String {
        if *self { "TRUE" } else { "FALSE" }.to_string()
    }
}

impl SqlValue for String {
    fn to_literal(&self) -> String {
        quote_literal(self)
    }
}

impl SqlValue for &'static str {
    fn to_literal(&self) -> String {
        quote_literal(self)
    }
}

impl<T: SqlValue> SqlValue for Option<T> {
    fn to_literal(&self) -> String {
        match self {
            Some(v) => v.to_literal(),
            None => "NULL".to_string(),
        }
    }
}

/// A clone-friendly parameter wrapper using Arc.
///
/// Cloning a builder shares its parameter values instead of copying them.
#[derive(Clone)]
pub struct Param {
    value: Arc<dyn ToSql + Send + Sync>,
    literal: Arc<str>,
}

impl Param {
    /// Create a new parameter from any bindable value.
    pub fn new<T: SqlValue>(value: T) -> Self {
        let literal = value.to_literal();
        Param {
            value: Arc::new(value),
            literal: literal.into(),
        }
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.value as &(dyn ToSql + Sync)
    }

    /// The inline SQL literal for this value.
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Param").field(&self.literal).finish()
    }
}

/// How placeholders are written while a statement is being rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// `$1, $2, ...` with values collected into the [`ParamList`].
    Placeholders,
    /// Values inlined as escaped literals.
    Inline,
}

/// A collection of parameters collected while rendering a statement.
#[derive(Clone, Debug)]
pub struct ParamList {
    params: Vec<Param>,
    mode: RenderMode,
}

impl ParamList {
    /// Create a new empty parameter list rendering `$n` placeholders.
    pub fn new() -> Self {
        Self::with_mode(RenderMode::Placeholders)
    }

    /// Create a new empty parameter list with the given render mode.
    pub fn with_mode(mode: RenderMode) -> Self {
        Self {
            params: Vec::new(),
            mode,
        }
    }

    /// Record a parameter and return the SQL text that stands for it.
    pub fn bind(&mut self, param: &Param) -> String {
        match self.mode {
            RenderMode::Placeholders => {
                self.params.push(param.clone());
                format!("${}", self.params.len())
            }
            RenderMode::Inline => param.literal().to_string(),
        }
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The collected parameters, in placeholder order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

impl Default for ParamList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_escape_quotes() {
        assert_eq!(Param::new("O'Brien").literal(), "'O''Brien'");
        assert_eq!(Param::new(String::from("Main St")).literal(), "'Main St'");
    }

    #[test]
    fn literals_for_scalars_and_null() {
        assert_eq!(Param::new(2i32).literal(), "2");
        assert_eq!(Param::new(true).literal(), "TRUE");
        assert_eq!(Param::new(None::<i64>).literal(), "NULL");
        assert_eq!(Param::new(Some("x")).literal(), "'x'");
    }

    #[test]
    fn placeholder_mode_numbers_in_order() {
        let mut list = ParamList::new();
        assert_eq!(list.bind(&Param::new(1i32)), "$1");
        assert_eq!(list.bind(&Param::new("a")), "$2");
        assert_eq!(list.len(), 2);
        assert_eq!(list.params()[1].literal(), "'a'");
    }

    #[test]
    fn inline_mode_collects_nothing() {
        let mut list = ParamList::with_mode(RenderMode::Inline);
        assert_eq!(list.bind(&Param::new("a")), "'a'");
        assert!(list.is_empty());
    }
}
