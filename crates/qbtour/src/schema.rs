//! Schema statements: CREATE TABLE, DROP TABLE, ALTER TABLE ... ADD COLUMN.
//!
//! Table definitions are written with a closure over a [`TableBuilder`]:
//!
//! ```ignore
//! use qbtour::schema::{self, DdlStatement};
//!
//! schema::drop_table_if_exists("users")?.execute(&client).await?;
//! schema::create_table("users", |t| {
//!     t.increments("id");
//!     t.string("name");
//!     t.string("email");
//! })?
//! .execute(&client)
//! .await?;
//! ```
//!
//! Identifiers are validated with [`Ident`] when the definition finishes;
//! defaults are rendered as escaped literals since DDL cannot take bind
//! parameters.

use crate::client::GenericClient;
use crate::error::{OrmError, OrmResult};
use crate::ident::Ident;
use crate::qb::SqlValue;

/// Length used by [`TableBuilder::string`].
pub const DEFAULT_STRING_LENGTH: u32 = 255;

/// A schema statement that can be rendered and executed.
pub trait DdlStatement: Sync {
    /// Render the statement.
    fn to_sql(&self) -> String;

    /// Execute the statement.
    fn execute(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = OrmResult<u64>> + Send {
        async move {
            let sql = self.to_sql();
            tracing::debug!(sql = %sql, "executing schema statement");
            conn.execute(&sql, &[]).await
        }
    }
}

/// Column data types supported by the builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-incrementing integer primary key.
    Increments,
    /// `VARCHAR(n)`.
    String(u32),
    /// `TEXT`.
    Text,
    /// `INTEGER`.
    Integer,
    /// `BOOLEAN`.
    Boolean,
}

impl ColumnType {
    fn sql(&self) -> String {
        match self {
            ColumnType::Increments => "SERIAL PRIMARY KEY".to_string(),
            ColumnType::String(len) => format!("VARCHAR({len})"),
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::Boolean => "BOOLEAN".to_string(),
        }
    }
}

/// A column definition as written by the caller.
#[derive(Clone, Debug)]
pub struct ColumnDef {
    name: String,
    ty: ColumnType,
    not_null: bool,
    unique: bool,
    default: Option<String>,
    references: Option<(String, String)>,
}

impl ColumnDef {
    fn new(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            not_null: false,
            unique: false,
            default: None,
            references: None,
        }
    }

    /// Add `NOT NULL`.
    pub fn not_null(&mut self) -> &mut Self {
        self.not_null = true;
        self
    }

    /// Add `UNIQUE`.
    pub fn unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    /// Add `DEFAULT <value>`.
    pub fn default_to<T: SqlValue>(&mut self, value: T) -> &mut Self {
        self.default = Some(value.to_literal());
        self
    }

    /// Add `REFERENCES <table> (<column>)`.
    pub fn references(&mut self, table: &str, column: &str) -> &mut Self {
        self.references = Some((table.to_string(), column.to_string()));
        self
    }

    fn to_sql(&self) -> OrmResult<String> {
        let mut sql = format!("{} {}", Ident::parse(&self.name)?, self.ty.sql());
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if let Some(ref default) = self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        if let Some((ref table, ref column)) = self.references {
            sql.push_str(&format!(
                " REFERENCES {} ({})",
                Ident::parse(table)?,
                Ident::parse(column)?
            ));
        }
        Ok(sql)
    }
}

/// Collects column definitions inside `create_table`/`alter_table` closures.
#[derive(Debug, Default)]
pub struct TableBuilder {
    columns: Vec<ColumnDef>,
}

impl TableBuilder {
    fn column(&mut self, name: &str, ty: ColumnType) -> &mut ColumnDef {
        self.columns.push(ColumnDef::new(name, ty));
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    /// Auto-incrementing integer primary key (`SERIAL PRIMARY KEY`).
    pub fn increments(&mut self, name: &str) -> &mut ColumnDef {
        self.column(name, ColumnType::Increments)
    }

    /// `VARCHAR(255)` column.
    pub fn string(&mut self, name: &str) -> &mut ColumnDef {
        self.column(name, ColumnType::String(DEFAULT_STRING_LENGTH))
    }

    /// `TEXT` column.
    pub fn text(&mut self, name: &str) -> &mut ColumnDef {
        self.column(name, ColumnType::Text)
    }

    /// `INTEGER` column.
    pub fn integer(&mut self, name: &str) -> &mut ColumnDef {
        self.column(name, ColumnType::Integer)
    }

    /// `BOOLEAN` column.
    pub fn boolean(&mut self, name: &str) -> &mut ColumnDef {
        self.column(name, ColumnType::Boolean)
    }

    fn finish(self) -> OrmResult<Vec<String>> {
        self.columns.iter().map(ColumnDef::to_sql).collect()
    }
}

/// `CREATE TABLE <name> (<columns>)`.
#[derive(Clone, Debug)]
pub struct CreateTable {
    table: Ident,
    columns: Vec<String>,
}

impl DdlStatement for CreateTable {
    fn to_sql(&self) -> String {
        format!("CREATE TABLE {} ({})", self.table, self.columns.join(", "))
    }
}

/// `DROP TABLE IF EXISTS <name>`, optionally `CASCADE`.
#[derive(Clone, Debug)]
pub struct DropTable {
    table: Ident,
    cascade: bool,
}

impl DropTable {
    /// Also drop constraints (such as foreign keys) that depend on the table.
    pub fn cascade(mut self) -> Self {
        self.cascade = true;
        self
    }
}

impl DdlStatement for DropTable {
    fn to_sql(&self) -> String {
        let mut sql = format!("DROP TABLE IF EXISTS {}", self.table);
        if self.cascade {
            sql.push_str(" CASCADE");
        }
        sql
    }
}

/// `ALTER TABLE <name> ADD COLUMN ..., ADD COLUMN ...`.
#[derive(Clone, Debug)]
pub struct AlterTable {
    table: Ident,
    added: Vec<String>,
}

impl DdlStatement for AlterTable {
    fn to_sql(&self) -> String {
        let adds: Vec<String> = self
            .added
            .iter()
            .map(|col| format!("ADD COLUMN {col}"))
            .collect();
        format!("ALTER TABLE {} {}", self.table, adds.join(", "))
    }
}

/// Define a new table.
pub fn create_table(name: &str, define: impl FnOnce(&mut TableBuilder)) -> OrmResult<CreateTable> {
    let table = Ident::parse(name)?;
    let mut builder = TableBuilder::default();
    define(&mut builder);
    let columns = builder.finish()?;
    if columns.is_empty() {
        return Err(OrmError::validation(format!(
            "CREATE TABLE {table} requires at least one column"
        )));
    }
    Ok(CreateTable { table, columns })
}

/// Drop a table if it exists.
pub fn drop_table_if_exists(name: &str) -> OrmResult<DropTable> {
    Ok(DropTable {
        table: Ident::parse(name)?,
        cascade: false,
    })
}

/// Add columns to an existing table.
pub fn alter_table(name: &str, define: impl FnOnce(&mut TableBuilder)) -> OrmResult<AlterTable> {
    let table = Ident::parse(name)?;
    let mut builder = TableBuilder::default();
    define(&mut builder);
    let added = builder.finish()?;
    if added.is_empty() {
        return Err(OrmError::validation(format!(
            "ALTER TABLE {table} requires at least one column"
        )));
    }
    Ok(AlterTable { table, added })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_users_table() {
        let stmt = create_table("users", |t| {
            t.increments("id");
            t.string("name");
            t.string("email");
            t.string("password");
        })
        .unwrap();
        assert_eq!(
            stmt.to_sql(),
            "CREATE TABLE users (id SERIAL PRIMARY KEY, name VARCHAR(255), \
             email VARCHAR(255), password VARCHAR(255))"
        );
    }

    #[test]
    fn create_table_with_foreign_key() {
        let stmt = create_table("useraddress", |t| {
            t.increments("id");
            t.integer("user_id").references("users", "id");
            t.string("address").not_null();
        })
        .unwrap();
        assert_eq!(
            stmt.to_sql(),
            "CREATE TABLE useraddress (id SERIAL PRIMARY KEY, \
             user_id INTEGER REFERENCES users (id), address VARCHAR(255) NOT NULL)"
        );
    }

    #[test]
    fn alter_table_with_default() {
        let stmt = alter_table("users", |t| {
            t.string("details").default_to("something important");
        })
        .unwrap();
        assert_eq!(
            stmt.to_sql(),
            "ALTER TABLE users ADD COLUMN details VARCHAR(255) DEFAULT 'something important'"
        );
    }

    #[test]
    fn drop_table_variants() {
        let stmt = drop_table_if_exists("users").unwrap();
        assert_eq!(stmt.to_sql(), "DROP TABLE IF EXISTS users");
        assert_eq!(stmt.cascade().to_sql(), "DROP TABLE IF EXISTS users CASCADE");
    }

    #[test]
    fn invalid_identifiers_are_rejected() {
        assert!(drop_table_if_exists("users; DROP TABLE x").is_err());
        assert!(create_table("users", |t| {
            t.string("favourite food");
        })
        .is_err());
        assert!(create_table("useraddress", |t| {
            t.integer("user_id").references("users", "1id");
        })
        .is_err());
    }

    #[test]
    fn empty_definitions_are_rejected() {
        let err = create_table("users", |_| {}).unwrap_err();
        assert!(err.is_validation());
        assert!(alter_table("users", |_| {}).is_err());
    }

    #[test]
    fn unique_and_boolean_columns() {
        let stmt = create_table("flags", |t| {
            t.boolean("is_admin").not_null().default_to(false);
            t.text("note").unique();
        })
        .unwrap();
        assert_eq!(
            stmt.to_sql(),
            "CREATE TABLE flags (is_admin BOOLEAN NOT NULL DEFAULT FALSE, note TEXT UNIQUE)"
        );
    }
}
