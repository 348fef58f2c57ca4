//! Transaction helper.
//!
//! Tour operations take `&impl GenericClient`, so the same function runs on a
//! pooled connection or inside a transaction. [`transaction!`] wraps a block so
//! that every statement in it either lands together or not at all.
//!
//! # Example
//!
//! ```ignore
//! use qbtour::qb::{self, MutationQb};
//!
//! let mut client = pool.get().await?;
//! let users = qbtour::transaction!(&mut client, tx, {
//!     qb::insert("users").set("name", "John Doe").execute(&tx).await?;
//!     qbtour::tour::read_users(&tx).await
//! })?;
//! ```

/// Runs the given block inside a database transaction.
///
/// - Begins a transaction via `$client.transaction().await`.
/// - Commits when the block returns `Ok(_)`.
/// - Rolls back when it returns `Err(_)` and hands that error back.
///
/// The block must evaluate to `qbtour::OrmResult<T>`. A failed rollback is
/// reported as [`OrmError::Other`](crate::OrmError::Other) carrying both errors.
#[macro_export]
macro_rules! transaction {
    ($client:expr, $tx:ident, $body:block) => {{
        let $tx = ($client)
            .transaction()
            .await
            .map_err($crate::OrmError::from_db_error)?;
        $crate::__private::tracing::debug!("transaction started");

        let __qbtour_tx_result = async { $body }.await;
        match __qbtour_tx_result {
            Ok(value) => {
                $tx.commit()
                    .await
                    .map_err($crate::OrmError::from_db_error)?;
                $crate::__private::tracing::debug!("transaction committed");
                Ok(value)
            }
            Err(error) => {
                $crate::__private::tracing::warn!(error = %error, "rolling back transaction");
                match $tx.rollback().await {
                    Ok(()) => Err(error),
                    Err(rollback_err) => Err($crate::OrmError::Other(format!(
                        "{error} (rollback failed: {rollback_err})"
                    ))),
                }
            }
        }
    }};
}
