//! Tour routes: one GET endpoint per demonstrated operation.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use qbtour::deadpool_postgres::{Client, Pool};
use qbtour::models::{JoinReport, User, UserAddress};
use qbtour::{Executor, tour};
use serde::Serialize;

use crate::error::AppResult;

// ==================
// Shared State
// ==================

/// State shared across handlers.
pub struct AppState {
    /// Shared pool used by every handler except `/builder`.
    pub pool: Pool,
    /// Runs façade descriptions on dedicated connections.
    pub executor: Executor,
}

impl AppState {
    pub fn new(pool: Pool, executor: Executor) -> Self {
        Self { pool, executor }
    }

    async fn client(&self) -> AppResult<Client> {
        Ok(self.pool.get().await?)
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: i32,
}

// ==================
// Routes
// ==================

pub fn tour_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(hello_handler))
        // Schema and seed data
        .route("/db", get(recreate_users_handler))
        .route("/db/more", get(insert_more_users_handler))
        .route("/db/deleteone", get(delete_first_user_handler))
        .route("/db/newtable", get(recreate_addresses_handler))
        .route("/db/jointables", get(join_tables_handler))
        .route("/db/modify", get(modify_user_handler))
        .route("/db/addcolumn", get(add_details_column_handler))
        // Reads
        .route("/raw", get(raw_users_handler))
        .route("/query", get(query_users_handler))
        .route("/builder", get(builder_handler))
        .route("/transaction", get(transaction_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn hello_handler() -> &'static str {
    "Hello World!"
}

async fn recreate_users_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<i32>>> {
    let client = state.client().await?;
    Ok(Json(tour::recreate_users(&client).await?))
}

async fn insert_more_users_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<User>>> {
    let client = state.client().await?;
    Ok(Json(tour::insert_more_users(&client).await?))
}

async fn delete_first_user_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<DeletedResponse>> {
    let client = state.client().await?;
    let deleted = tour::delete_first_user(&client).await?;
    Ok(Json(DeletedResponse { deleted }))
}

async fn recreate_addresses_handler(State(state): State<Arc<AppState>>) -> AppResult<&'static str> {
    let client = state.client().await?;
    Ok(tour::recreate_addresses(&client).await?)
}

async fn join_tables_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<JoinReport>> {
    let client = state.client().await?;
    Ok(Json(tour::join_tables(&client).await?))
}

async fn modify_user_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<User>>> {
    let client = state.client().await?;
    Ok(Json(tour::modify_user(&client).await?))
}

async fn add_details_column_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<User>>> {
    let client = state.client().await?;
    Ok(Json(tour::add_details_column(&client).await?))
}

async fn raw_users_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<User>>> {
    let client = state.client().await?;
    Ok(Json(tour::raw_users(&client).await?))
}

async fn query_users_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<User>>> {
    let client = state.client().await?;
    Ok(Json(tour::query_users(&client).await?))
}

async fn builder_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(tour::builder_demo(&state.executor).await?))
}

async fn transaction_handler(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<UserAddress>>> {
    let mut client = state.client().await?;
    Ok(Json(tour::transaction_demo(&mut client).await?))
}
