//! The storage capability the reconciliation engine drives.
//!
//! A backend owns one session against the target database. Every apply and revert is a
//! transactional unit: either the body's effect and the tracking row change both persist,
//! or neither does. The engine never issues a body outside of these calls.

use core::future::Future;
use core::pin::Pin;
use strata_migration::{AppliedMigration, Migration};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Run `down` then `up` again after the first `up`, inside the same transaction, so a
    /// broken `down` body is caught while the migration is still being written.
    pub verify_reversibility: bool,
}

pub trait MigrationStore: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Applied rows of `table`, in any order. Creates the table when it does not exist.
    fn list_migrations<'a>(
        &'a mut self,
        table: &'a str,
    ) -> BoxFuture<'a, Result<Vec<AppliedMigration>, Self::Error>>;

    /// Runs `migration.up` and records it in `table`, atomically.
    fn apply_migration<'a>(
        &'a mut self,
        table: &'a str,
        migration: &'a Migration,
        options: ApplyOptions,
    ) -> BoxFuture<'a, Result<(), Self::Error>>;

    /// Runs `migration.down` and deletes its row from `table`, atomically.
    fn revert_migration<'a>(
        &'a mut self,
        table: &'a str,
        migration: &'a AppliedMigration,
    ) -> BoxFuture<'a, Result<(), Self::Error>>;

    /// Releases the underlying session.
    fn close<'a>(&'a mut self) -> BoxFuture<'a, Result<(), Self::Error>>;
}
