//! HTTP surface for the qbtour operations.
//!
//! Each route runs one operation from [`qbtour::tour`] and answers with JSON
//! (or plain text for `/` and `/db/newtable`). Failures are answered with a
//! status code and a JSON `{"error": ..., "code": ...}` body.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use config::HttpConfig;
pub use error::{AppError, AppResult};
pub use routes::{AppState, tour_routes};
pub use server::{build_router, serve};
