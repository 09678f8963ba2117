//! Database transaction utilities
//!
//! Provides a helper for executing multiple statements within one transaction
//! so they are persisted together or not at all.

use sqlx::{PgPool, Postgres, Transaction};
use std::future::Future;
use std::pin::Pin;
use zloom_core::AppError;

/// Execute a closure within a database transaction
///
/// Begins a transaction, runs the closure with it, then commits when the
/// closure succeeds and rolls back when it fails. A failed commit is reported
/// as `AppError::Database`.
///
/// # Example
///
/// ```ignore
/// use zloom_db::with_transaction;
///
/// async fn example(pool: &sqlx::PgPool) -> Result<(), zloom_core::AppError> {
///     with_transaction(pool, |tx| {
///         Box::pin(async move {
///             sqlx::query("UPDATE ...").execute(&mut **tx).await?;
///             sqlx::query("INSERT INTO ...").execute(&mut **tx).await?;
///             Ok(())
///         })
///     })
///     .await
/// }
/// ```
pub async fn with_transaction<T, F>(pool: &PgPool, f: F) -> Result<T, AppError>
where
    F: for<'a> FnOnce(
        &'a mut Transaction<'_, Postgres>,
    ) -> Pin<Box<dyn Future<Output = Result<T, AppError>> + Send + 'a>>,
{
    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to begin transaction");
        AppError::Database(e)
    })?;

    match f(&mut tx).await {
        Ok(result) => {
            tx.commit().await.map_err(|e| {
                tracing::error!(error = %e, "Failed to commit transaction");
                AppError::Database(e)
            })?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = %rollback_err,
                    original_error = %e,
                    "Failed to rollback transaction"
                );
            }
            Err(e)
        }
    }
}
