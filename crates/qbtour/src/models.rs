//! Records read from and written to the tour tables.

use crate::error::OrmResult;
use crate::qb::InsertRow;
use crate::row::{FromRow, RowExt};
use serde::Serialize;
use tokio_postgres::Row;

/// A row of `users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Only present once the `details` column has been added.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl FromRow for User {
    fn from_row(row: &Row) -> OrmResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
            email: row.try_get_column("email")?,
            password: row.try_get_column("password")?,
            details: row.try_get_optional_column("details")?,
        })
    }
}

/// Values for a new `users` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

impl NewUser {
    pub const fn new(name: &'static str, email: &'static str, password: &'static str) -> Self {
        Self {
            name,
            email,
            password,
        }
    }

    pub fn insert_row(&self) -> InsertRow {
        InsertRow::new()
            .set("name", self.name)
            .set("email", self.email)
            .set("password", self.password)
    }
}

/// A row of `useraddress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub id: i32,
    pub user_id: Option<i32>,
    pub address: Option<String>,
}

impl FromRow for Address {
    fn from_row(row: &Row) -> OrmResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            user_id: row.try_get_column("user_id")?,
            address: row.try_get_column("address")?,
        })
    }
}

/// Values for a new `useraddress` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub user_id: i32,
    pub address: &'static str,
}

impl NewAddress {
    pub const fn new(user_id: i32, address: &'static str) -> Self {
        Self { user_id, address }
    }

    pub fn insert_row(&self) -> InsertRow {
        InsertRow::new()
            .set("user_id", self.user_id)
            .set("address", self.address)
    }
}

/// A user with the text of every address that points at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWithAddresses {
    #[serde(flatten)]
    pub user: User,
    pub address: Vec<String>,
}

/// Attach addresses to their users by `user_id`.
///
/// Users keep their order; each user's addresses keep the order they have in
/// `addresses`. Addresses without text or without a matching user are skipped.
pub fn map_addresses(users: &[User], addresses: &[Address]) -> Vec<UserWithAddresses> {
    users
        .iter()
        .map(|user| UserWithAddresses {
            user: user.clone(),
            address: addresses
                .iter()
                .filter(|a| a.user_id == Some(user.id))
                .filter_map(|a| a.address.clone())
                .collect(),
        })
        .collect()
}

/// One row of the inner join between `users` and `useraddress`.
///
/// Both tables have an `id`, so the join selects them under distinct names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAddressJoin {
    pub user_id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub address_id: i32,
    pub address: Option<String>,
}

impl UserAddressJoin {
    /// Columns matching this record, for `SelectQb::select_cols`.
    pub const COLUMNS: &'static [&'static str] = &[
        "users.id AS user_id",
        "users.name",
        "users.email",
        "users.password",
        "useraddress.id AS address_id",
        "useraddress.address",
    ];
}

impl FromRow for UserAddressJoin {
    fn from_row(row: &Row) -> OrmResult<Self> {
        Ok(Self {
            user_id: row.try_get_column("user_id")?,
            name: row.try_get_column("name")?,
            email: row.try_get_column("email")?,
            password: row.try_get_column("password")?,
            address_id: row.try_get_column("address_id")?,
            address: row.try_get_column("address")?,
        })
    }
}

/// A user id with one of its addresses, or `None` for users without any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAddress {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub address: Option<String>,
}

impl FromRow for UserAddress {
    fn from_row(row: &Row) -> OrmResult<Self> {
        Ok(Self {
            user_id: row.try_get_column("userId")?,
            address: row.try_get_column("address")?,
        })
    }
}

/// Everything `join_tables` reads back after seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinReport {
    pub users: Vec<User>,
    pub address: Vec<Address>,
    pub mapped: Vec<UserWithAddresses>,
    /// `useraddress` joined to `users`, in address order.
    pub joint: Vec<UserAddressJoin>,
    /// `users` joined to `useraddress`, in user order.
    pub joint2: Vec<UserAddressJoin>,
}
