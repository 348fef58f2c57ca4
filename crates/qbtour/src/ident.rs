//! SQL identifier validation for schema statements.
//!
//! Table and column names handed to the schema builder are spliced into DDL,
//! so they are checked before rendering:
//!
//! - Bare names must match `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted names allow anything except NUL, with `"` written as `""`
//! - Names may be qualified with `.` (`public.users`)

use crate::error::{OrmError, OrmResult};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// One dot-separated segment of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Bare(String),
    Quoted(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Bare(name) => f.write_str(name),
            Segment::Quoted(name) => write!(f, "\"{}\"", name.replace('"', "\"\"")),
        }
    }
}

/// A validated SQL identifier (schema, table, or column name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    segments: Vec<Segment>,
}

impl Ident {
    /// Parse an identifier string, supporting dotted and quoted forms.
    pub fn parse(s: &str) -> OrmResult<Self> {
        if s.is_empty() {
            return Err(OrmError::validation("identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(OrmError::validation("identifier cannot contain NUL"));
        }

        let mut chars = s.chars().peekable();
        let mut segments = vec![read_segment(s, &mut chars)?];
        while let Some(c) = chars.next() {
            if c != '.' {
                return Err(OrmError::validation(format!(
                    "expected '.' after identifier segment in '{s}', got '{c}'"
                )));
            }
            segments.push(read_segment(s, &mut chars)?);
        }

        Ok(Self { segments })
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

fn read_segment(source: &str, chars: &mut Peekable<Chars<'_>>) -> OrmResult<Segment> {
    if chars.next_if_eq(&'"').is_some() {
        return read_quoted(source, chars);
    }

    let mut name = String::new();
    while let Some(c) = chars.next_if(|c| *c != '.') {
        let allowed = c == '_'
            || c.is_ascii_alphabetic()
            || (!name.is_empty() && (c == '$' || c.is_ascii_digit()));
        if !allowed {
            return Err(OrmError::validation(format!(
                "invalid character '{c}' in identifier '{source}'"
            )));
        }
        name.push(c);
    }
    if name.is_empty() {
        return Err(OrmError::validation(format!(
            "empty segment in identifier '{source}'"
        )));
    }
    Ok(Segment::Bare(name))
}

// The opening quote has already been consumed.
fn read_quoted(source: &str, chars: &mut Peekable<Chars<'_>>) -> OrmResult<Segment> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some('"') if chars.next_if_eq(&'"').is_some() => name.push('"'),
            Some('"') => break,
            Some(c) => name.push(c),
            None => {
                return Err(OrmError::validation(format!(
                    "unclosed quote in identifier '{source}'"
                )));
            }
        }
    }
    if name.is_empty() {
        return Err(OrmError::validation(format!(
            "empty quoted segment in identifier '{source}'"
        )));
    }
    Ok(Segment::Quoted(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_qualified_names() {
        assert_eq!(Ident::parse("useraddress").unwrap().to_sql(), "useraddress");
        assert_eq!(Ident::parse("public.users").unwrap().to_sql(), "public.users");
        assert_eq!(Ident::parse("user_id$2").unwrap().to_string(), "user_id$2");
    }

    #[test]
    fn quoted_names_keep_escapes() {
        let ident = Ident::parse(r#""favourite ""food""""#).unwrap();
        assert_eq!(ident.to_sql(), r#""favourite ""food""""#);

        let ident = Ident::parse(r#"public."UserTable".id"#).unwrap();
        assert_eq!(ident.to_sql(), r#"public."UserTable".id"#);
    }

    #[test]
    fn malformed_names_are_validation_errors() {
        for bad in [
            "",
            "1users",
            "favourite food",
            "users; DROP TABLE users",
            "schema..table",
            "schema.",
            ".users",
            r#""unclosed"#,
            r#""""#,
            r#""a"b"#,
        ] {
            let err = Ident::parse(bad).unwrap_err();
            assert!(err.is_validation(), "{bad:?} should be rejected");
        }
    }
}
