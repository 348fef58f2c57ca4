//! Errors raised while running the tour against Postgres.

use thiserror::Error;
use tokio_postgres::error::SqlState;

pub type OrmResult<T> = Result<T, OrmError>;

/// Everything a tour operation can fail with.
///
/// The HTTP layer maps these onto status codes, so the variants are split by
/// what a caller can do about them rather than by where they came from.
#[derive(Debug, Error)]
pub enum OrmError {
    /// The database could not be reached, or its URL did not parse.
    #[error("cannot reach database: {0}")]
    Connection(String),

    /// Postgres rejected a statement for a reason the tour does not single out,
    /// such as adding `details` a second time.
    #[error("database error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// A row the operation needs is missing (`/db/deleteone` on an empty table).
    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate key {0}")]
    UniqueViolation(String),

    /// Seed rows pointing at users that do not exist, as `/db/newtable` does
    /// after users 1 and 2 were deleted.
    #[error("foreign key {0}")]
    ForeignKeyViolation(String),

    /// A column could not be read into its record field.
    #[error("cannot read column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Bad identifiers, bad configuration or an incomplete statement.
    #[error("invalid input: {0}")]
    Validation(String),

    /// No connection could be checked out of the pool.
    #[error("pool exhausted or closed: {0}")]
    Pool(String),

    /// Failures with no better home, e.g. a rollback that failed as well.
    #[error("{0}")]
    Other(String),
}

impl OrmError {
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Classify a statement failure.
    ///
    /// Only unique and foreign-key violations get their own variant; both
    /// carry `<constraint>: <server message>`.
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        let Some(db_err) = err.as_db_error() else {
            return Self::Query(err);
        };
        let detail = constraint_detail(db_err.constraint(), db_err.message());
        let code = db_err.code();
        if *code == SqlState::UNIQUE_VIOLATION {
            Self::UniqueViolation(detail)
        } else if *code == SqlState::FOREIGN_KEY_VIOLATION {
            Self::ForeignKeyViolation(detail)
        } else {
            Self::Query(err)
        }
    }
}

fn constraint_detail(constraint: Option<&str>, message: &str) -> String {
    format!("{}: {}", constraint.unwrap_or("unnamed constraint"), message)
}

impl From<deadpool_postgres::PoolError> for OrmError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_names_the_column() {
        let err = OrmError::decode("email", "unexpected null");
        assert_eq!(err.to_string(), "cannot read column 'email': unexpected null");
    }

    #[test]
    fn predicates_match_variants() {
        assert!(OrmError::not_found("no users").is_not_found());
        assert!(!OrmError::not_found("no users").is_validation());
        assert!(OrmError::validation("bad ident").is_validation());
    }

    #[test]
    fn constraint_violations_name_the_constraint() {
        let detail = constraint_detail(
            Some("useraddress_user_id_foreign"),
            "insert or update on table \"useraddress\" violates foreign key constraint",
        );
        let err = OrmError::ForeignKeyViolation(detail);
        assert_eq!(
            err.to_string(),
            "foreign key useraddress_user_id_foreign: insert or update on table \
             \"useraddress\" violates foreign key constraint"
        );

        let detail = constraint_detail(None, "duplicate key value");
        assert_eq!(
            OrmError::UniqueViolation(detail).to_string(),
            "duplicate key unnamed constraint: duplicate key value"
        );
    }
}
