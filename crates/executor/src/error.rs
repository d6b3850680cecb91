use core::fmt;

/// A single body run inside a migration transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStep {
    Up,
    VerifyDown,
    VerifyUp,
    Down,
}

impl fmt::Display for BodyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyStep::Up => f.write_str("up"),
            BodyStep::VerifyDown => f.write_str("down (reversibility check)"),
            BodyStep::VerifyUp => f.write_str("up (reversibility check)"),
            BodyStep::Down => f.write_str("down"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutorError {
    #[error("database connection failed: {message}")]
    ConnectFailed { message: String },

    #[error("unsupported database url '{url}': expected a sqlite: or postgres: url")]
    UnsupportedUrl { url: String },

    #[error("invalid tracking table name '{table}': expected letters, digits and underscores")]
    InvalidTableName { table: String },

    #[error("migration session is already closed")]
    SessionClosed,

    #[error("tracking table '{table}' {operation} failed: {message}")]
    TrackingFailed {
        table: String,
        operation: &'static str,
        message: String,
    },

    #[error("{step} body of migration {migration_id} failed: {message}")]
    StatementExecutionFailed {
        migration_id: i64,
        step: BodyStep,
        message: String,
    },

    #[error("transaction begin failed (id={migration_id}): {message}")]
    TransactionBeginFailed { migration_id: i64, message: String },

    #[error("transaction commit failed (id={migration_id}): {message}")]
    TransactionCommitFailed { migration_id: i64, message: String },

    #[error("transaction rollback failed (id={migration_id}): {message}; original_error={original_error}")]
    TransactionRollbackFailed {
        migration_id: i64,
        message: String,
        original_error: String,
    },

    #[error("closing the connection failed: {message}")]
    CloseFailed { message: String },
}
