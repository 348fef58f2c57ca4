//! Trait definitions for query builders.

use crate::client::GenericClient;
use crate::error::OrmResult;
use crate::qb::param::{Param, ParamList, RenderMode};
use crate::row::FromRow;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Base trait for all query builders.
///
/// A builder is a description of a statement: building it never touches the
/// network, only the `fetch_*`/`execute` methods do.
pub trait SqlQb: Sync {
    /// Render the statement, binding values through `params`.
    fn render(&self, params: &mut ParamList) -> String;

    /// Validate builder state before execution.
    fn validate(&self) -> OrmResult<()> {
        Ok(())
    }

    /// The parameterized SQL (`$1`, `$2`, ...).
    fn to_sql(&self) -> String {
        self.render(&mut ParamList::new())
    }

    /// The SQL with every value inlined as an escaped literal.
    fn to_inline_sql(&self) -> String {
        self.render(&mut ParamList::with_mode(RenderMode::Inline))
    }

    /// Validate and render into SQL text plus its ordered parameters.
    fn build(&self) -> OrmResult<BuiltQuery> {
        self.validate()?;
        let mut params = ParamList::new();
        let sql = self.render(&mut params);
        Ok(BuiltQuery {
            sql,
            params: params.params().to_vec(),
        })
    }

    /// Execute query and return all rows.
    fn fetch_all(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = OrmResult<Vec<Row>>> + Send {
        async move {
            let built = self.build()?;
            conn.query(&built.sql, &built.params_ref()).await
        }
    }

    /// Execute query and map all rows to `T`.
    fn fetch_all_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = OrmResult<Vec<T>>> + Send {
        async move {
            let rows = self.fetch_all(conn).await?;
            rows.iter().map(T::from_row).collect()
        }
    }

    /// Execute query and map the first row to `T`, if any.
    fn fetch_opt_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = OrmResult<Option<T>>> + Send {
        async move {
            let built = self.build()?;
            let row = conn.query_opt(&built.sql, &built.params_ref()).await?;
            row.as_ref().map(T::from_row).transpose()
        }
    }
}

/// Trait for mutation builders (INSERT/UPDATE/DELETE).
pub trait MutationQb: SqlQb {
    /// Execute and return affected row count.
    fn execute(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = OrmResult<u64>> + Send {
        async move {
            let built = self.build()?;
            conn.execute(&built.sql, &built.params_ref()).await
        }
    }
}

/// The result of building a query: the text sent to the server and its values.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Param>,
}

impl BuiltQuery {
    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

/// Implements `Display` as the inlined SQL text of a builder.
macro_rules! impl_display_as_inline_sql {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&$crate::qb::SqlQb::to_inline_sql(self))
                }
            }
        )*
    };
}

pub(crate) use impl_display_as_inline_sql;
