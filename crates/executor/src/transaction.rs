use crate::error::{BodyStep, ExecutorError};
use sqlx::{Connection, Database, Transaction};

pub async fn begin<C>(
    conn: &mut C,
    migration_id: i64,
) -> Result<Transaction<'_, C::Database>, ExecutorError>
where
    C: Connection,
{
    conn.begin().await.map_err(|e| ExecutorError::TransactionBeginFailed {
        migration_id,
        message: e.to_string(),
    })
}

pub async fn commit<DB>(tx: Transaction<'_, DB>, migration_id: i64) -> Result<(), ExecutorError>
where
    DB: Database,
{
    tx.commit()
        .await
        .map_err(|e| ExecutorError::TransactionCommitFailed {
            migration_id,
            message: e.to_string(),
        })
}

/// Rolls `tx` back after `original_error` and hands that error back, unless the rollback
/// itself fails.
pub async fn abort<DB>(
    tx: Transaction<'_, DB>,
    migration_id: i64,
    original_error: ExecutorError,
) -> ExecutorError
where
    DB: Database,
{
    match tx.rollback().await {
        Ok(()) => original_error,
        Err(e) => ExecutorError::TransactionRollbackFailed {
            migration_id,
            message: e.to_string(),
            original_error: original_error.to_string(),
        },
    }
}

pub fn body_error(migration_id: i64, step: BodyStep, err: sqlx::Error) -> ExecutorError {
    ExecutorError::StatementExecutionFailed {
        migration_id,
        step,
        message: err.to_string(),
    }
}
