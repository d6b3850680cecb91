use core::fmt;
use strata_migration::LoadError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Apply,
    Revert,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Apply => f.write_str("apply"),
            Operation::Revert => f.write_str("revert"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("migration {id} has a checksum mismatch, aborting")]
    ChecksumMismatch { id: i64 },

    #[error("failed to read applied migrations from '{table}': {source}")]
    AppliedState {
        table: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to {operation} migration {id}: {source}")]
    Execution {
        id: i64,
        operation: Operation,
        #[source]
        source: BoxError,
    },

    #[error("failed to close the migration session: {source}")]
    Close {
        #[source]
        source: BoxError,
    },
}

impl MigrateError {
    /// Id of the migration the run stopped at, when there is one.
    pub fn migration_id(&self) -> Option<i64> {
        match self {
            MigrateError::Load(LoadError::Series { actual, .. }) => Some(*actual),
            MigrateError::Load(LoadError::MissingSection { id, .. }) => Some(*id),
            MigrateError::ChecksumMismatch { id } | MigrateError::Execution { id, .. } => Some(*id),
            _ => None,
        }
    }
}
