//! The demonstrated operations, one function per HTTP route.
//!
//! Every function takes its connection explicitly. Anything generic over
//! [`GenericClient`] runs the same on a pooled connection or inside a
//! transaction; [`builder_demo`] goes through the [`Executor`] instead.
//!
//! Tables are dropped and recreated on request, so the data here is
//! throwaway.

use crate::client::GenericClient;
use crate::error::{OrmError, OrmResult};
use crate::executor::Executor;
use crate::models::{
    Address, JoinReport, NewAddress, NewUser, User, UserAddress, UserAddressJoin, map_addresses,
};
use crate::qb::{self, MutationQb, SqlQb};
use crate::row::FromRow;
use crate::schema::{self, CreateTable, DdlStatement};

pub const USERS: &str = "users";
pub const ADDRESSES: &str = "useraddress";

const DEFAULT_PASSWORD: &str = "123456";

fn users_table() -> OrmResult<CreateTable> {
    schema::create_table(USERS, |t| {
        t.increments("id");
        t.string("name");
        t.string("email");
        t.string("password");
    })
}

fn addresses_table() -> OrmResult<CreateTable> {
    schema::create_table(ADDRESSES, |t| {
        t.increments("id");
        t.integer("user_id").references(USERS, "id");
        t.string("address");
    })
}

/// All users, ordered by id.
pub async fn read_users(conn: &impl GenericClient) -> OrmResult<Vec<User>> {
    qb::select(USERS).order_by("id").fetch_all_as(conn).await
}

/// All addresses, ordered by id.
pub async fn read_addresses(conn: &impl GenericClient) -> OrmResult<Vec<Address>> {
    qb::select(ADDRESSES).order_by("id").fetch_all_as(conn).await
}

/// Drop and recreate `users`, then seed two users in one statement.
///
/// Dependent foreign keys are dropped along with the table. Returns the
/// generated ids.
pub async fn recreate_users(conn: &impl GenericClient) -> OrmResult<Vec<i32>> {
    schema::drop_table_if_exists(USERS)?.cascade().execute(conn).await?;
    tracing::info!(table = USERS, "dropped table");

    tracing::info!(table = USERS, "creating new table");
    users_table()?.execute(conn).await?;

    let ids: Vec<i32> = qb::insert(USERS)
        .rows([
            NewUser::new("John Doe", "john@doe.comn", DEFAULT_PASSWORD).insert_row(),
            NewUser::new("Jane Doe", "jane@done.com", DEFAULT_PASSWORD).insert_row(),
        ])
        .returning("id")
        .fetch_all_as(conn)
        .await?;
    tracing::info!(?ids, "seeded users");
    Ok(ids)
}

/// Insert one user, then two more as a single batch.
pub async fn insert_more_users(conn: &impl GenericClient) -> OrmResult<Vec<User>> {
    qb::insert(USERS)
        .row(NewUser::new("Bam bam", "bam@bam.com", DEFAULT_PASSWORD).insert_row())
        .execute(conn)
        .await?;

    let inserted = qb::insert(USERS)
        .rows([
            NewUser::new("Peter Piper", "peter@peter.com", DEFAULT_PASSWORD).insert_row(),
            NewUser::new("Pan", "pan@pan.com", DEFAULT_PASSWORD).insert_row(),
        ])
        .execute(conn)
        .await?;
    tracing::info!(inserted, "inserted batch");

    read_users(conn).await
}

/// Delete the user with the lowest id and return that id.
///
/// Fails with [`OrmError::NotFound`] when `users` is empty.
pub async fn delete_first_user(conn: &impl GenericClient) -> OrmResult<i32> {
    let id: i32 = qb::select(USERS)
        .select("id")
        .order_by("id")
        .limit(1)
        .fetch_opt_as(conn)
        .await?
        .ok_or_else(|| OrmError::not_found("no user left to delete"))?;
    tracing::info!(id, "deleting user");

    qb::delete(USERS).eq("id", id).execute(conn).await?;
    Ok(id)
}

/// Drop and recreate `useraddress`, then seed one address for users 1 and 2.
///
/// Both users must exist, otherwise the foreign key rejects the seed rows.
pub async fn recreate_addresses(conn: &impl GenericClient) -> OrmResult<&'static str> {
    schema::drop_table_if_exists(ADDRESSES)?.execute(conn).await?;
    addresses_table()?.execute(conn).await?;

    qb::insert(ADDRESSES)
        .rows([
            NewAddress::new(1, "123 Main St").insert_row(),
            NewAddress::new(2, "456 Main St").insert_row(),
        ])
        .execute(conn)
        .await?;
    tracing::info!(table = ADDRESSES, "new table created");
    Ok("New table created")
}

/// Rebuild both tables, seed them, and read them back separately, mapped,
/// and joined from either side.
pub async fn join_tables(conn: &impl GenericClient) -> OrmResult<JoinReport> {
    schema::drop_table_if_exists(ADDRESSES)?.execute(conn).await?;
    schema::drop_table_if_exists(USERS)?.execute(conn).await?;
    users_table()?.execute(conn).await?;
    addresses_table()?.execute(conn).await?;

    qb::insert(USERS)
        .rows([
            NewUser::new("John Doe", "john@john.com", DEFAULT_PASSWORD).insert_row(),
            NewUser::new("Jane Doe", "jane@jane.com", DEFAULT_PASSWORD).insert_row(),
        ])
        .execute(conn)
        .await?;
    qb::insert(ADDRESSES)
        .rows([
            NewAddress::new(1, "123 Main St").insert_row(),
            NewAddress::new(2, "456 Main St").insert_row(),
            NewAddress::new(2, "789 Main St").insert_row(),
        ])
        .execute(conn)
        .await?;

    let users = read_users(conn).await?;
    let address = read_addresses(conn).await?;
    let mapped = map_addresses(&users, &address);

    let joint = qb::select(ADDRESSES)
        .select_cols(UserAddressJoin::COLUMNS)
        .inner_join(USERS, "useraddress.user_id", "users.id")
        .order_by("useraddress.id")
        .fetch_all_as(conn)
        .await?;
    let joint2 = qb::select(USERS)
        .select_cols(UserAddressJoin::COLUMNS)
        .inner_join(ADDRESSES, "users.id", "useraddress.user_id")
        .order_by("users.id")
        .order_by("useraddress.id")
        .fetch_all_as(conn)
        .await?;

    Ok(JoinReport {
        users,
        address,
        mapped,
        joint,
        joint2,
    })
}

/// Overwrite user 1 and return all users.
pub async fn modify_user(conn: &impl GenericClient) -> OrmResult<Vec<User>> {
    let updated = qb::update(USERS)
        .set("name", "John Doe")
        .set("email", "johnnyboy@gmail.com")
        .set("password", DEFAULT_PASSWORD)
        .eq("id", 1)
        .execute(conn)
        .await?;
    tracing::info!(updated, "modified user 1");
    read_users(conn).await
}

/// Add the `details` column to `users` and return all users.
///
/// The column already existing is a database error.
pub async fn add_details_column(conn: &impl GenericClient) -> OrmResult<Vec<User>> {
    schema::alter_table(USERS, |t| {
        t.string("details").default_to("something important");
    })?
    .execute(conn)
    .await?;
    read_users(conn).await
}

/// `select * from users`, sent as literal SQL text.
pub async fn raw_users(conn: &impl GenericClient) -> OrmResult<Vec<User>> {
    let rows = conn.query("select * from users", &[]).await?;
    rows.iter().map(User::from_row).collect()
}

/// `select * from users`, through the query builder.
pub async fn query_users(conn: &impl GenericClient) -> OrmResult<Vec<User>> {
    read_users(conn).await
}

/// Describe two queries with the façade and run both through `executor`.
///
/// The second result (user 2) is only logged; the full list is returned.
pub async fn builder_demo(executor: &Executor) -> OrmResult<Vec<User>> {
    let list = qb::get_builder(USERS);
    let user2 = qb::get_builder(USERS).eq("id", 2);

    let user_list = executor.execute_as::<User>(&list).await?;
    let found = executor.execute_as::<User>(&user2).await?;
    tracing::info!(query = %user2, users = ?found, "second description");

    Ok(user_list)
}

/// Insert the address for `user_id`.
///
/// Takes any client, so it runs inside the caller's transaction when given one.
pub async fn add_address(conn: &impl GenericClient, user_id: i32) -> OrmResult<u64> {
    qb::insert(ADDRESSES)
        .set("address", "123 Main St")
        .set("user_id", user_id)
        .execute(conn)
        .await
}

/// Each user id with its addresses (`None` for users without any).
pub async fn read_user_addresses(conn: &impl GenericClient) -> OrmResult<Vec<UserAddress>> {
    qb::select(USERS)
        .select_as("users.id", "userId")
        .select_as("useraddress.address", "address")
        .left_join(ADDRESSES, "users.id", "useraddress.user_id")
        .order_by("users.id")
        .order_by("useraddress.id")
        .fetch_all_as(conn)
        .await
}

/// Run the transaction body: a raw insert, a read, a dependent insert and a
/// left-join projection. All of it commits together or not at all.
pub async fn transaction_demo(
    client: &mut deadpool_postgres::Client,
) -> OrmResult<Vec<UserAddress>> {
    crate::transaction!(client, tx, {
        insert_user_raw(&tx).await?;

        let users = read_users(&tx).await?;
        let last = users
            .last()
            .ok_or_else(|| OrmError::not_found("no users after insert"))?;
        add_address(&tx, last.id).await?;

        read_user_addresses(&tx).await
    })
}

async fn insert_user_raw(conn: &impl GenericClient) -> OrmResult<u64> {
    conn.execute(
        "INSERT INTO users (name, email, password) \
         VALUES ('John Doe', 'john@doe.com', '123456')",
        &[],
    )
    .await
}
