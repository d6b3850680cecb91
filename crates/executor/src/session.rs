use crate::error::{BodyStep, ExecutorError};
use crate::table::{Dialect, TrackingTable};
use crate::transaction;
use sqlx::Connection;
use strata_contracts::{ApplyOptions, BoxFuture};
use strata_migration::{AppliedMigration, Migration};

/// The statements a backend connection runs for a migration session.
///
/// Every method is implemented on a concrete connection type and returns a boxed future,
/// so [`SqlxStore`] can share one transactional flow between backends.
pub trait TrackingConnection: Connection {
    const DIALECT: Dialect;

    /// Creates `table` when missing and returns its rows ordered by id.
    fn read_applied<'a>(
        &'a mut self,
        table: &'a TrackingTable,
    ) -> BoxFuture<'a, Result<Vec<AppliedMigration>, ExecutorError>>;

    /// Runs one migration body, which may hold several statements.
    fn execute_body<'a>(
        &'a mut self,
        migration_id: i64,
        step: BodyStep,
        body: &'a str,
    ) -> BoxFuture<'a, Result<(), ExecutorError>>;

    fn insert_row<'a>(
        &'a mut self,
        table: &'a TrackingTable,
        migration: &'a Migration,
    ) -> BoxFuture<'a, Result<(), ExecutorError>>;

    fn delete_row<'a>(
        &'a mut self,
        table: &'a TrackingTable,
        migration_id: i64,
    ) -> BoxFuture<'a, Result<(), ExecutorError>>;
}

/// Implements [`TrackingConnection`] for a sqlx connection type.
macro_rules! tracking_connection {
    ($conn:ty, $dialect:ident) => {
        impl $crate::session::TrackingConnection for $conn {
            const DIALECT: $crate::table::Dialect = $crate::table::Dialect::$dialect;

            fn read_applied<'a>(
                &'a mut self,
                table: &'a $crate::table::TrackingTable,
            ) -> ::strata_contracts::BoxFuture<
                'a,
                Result<Vec<::strata_migration::AppliedMigration>, $crate::error::ExecutorError>,
            > {
                Box::pin(async move {
                    ::sqlx::query(&table.create_sql())
                        .execute(&mut *self)
                        .await
                        .map_err(|e| table.tracking_error("create", e))?;

                    let rows: Vec<$crate::table::TrackingRow> = ::sqlx::query_as(&table.select_sql())
                        .fetch_all(&mut *self)
                        .await
                        .map_err(|e| table.tracking_error("select", e))?;

                    Ok(rows.into_iter().map($crate::table::into_applied).collect())
                })
            }

            fn execute_body<'a>(
                &'a mut self,
                migration_id: i64,
                step: $crate::error::BodyStep,
                body: &'a str,
            ) -> ::strata_contracts::BoxFuture<'a, Result<(), $crate::error::ExecutorError>> {
                Box::pin(async move {
                    ::tracing::trace!(migration_id, %step, "executing migration body");
                    ::sqlx::Executor::execute(&mut *self, ::sqlx::raw_sql(body))
                        .await
                        .map(|_| ())
                        .map_err(|e| $crate::transaction::body_error(migration_id, step, e))
                })
            }

            fn insert_row<'a>(
                &'a mut self,
                table: &'a $crate::table::TrackingTable,
                migration: &'a ::strata_migration::Migration,
            ) -> ::strata_contracts::BoxFuture<'a, Result<(), $crate::error::ExecutorError>> {
                Box::pin(async move {
                    ::sqlx::query(&table.insert_sql())
                        .bind(migration.id)
                        .bind(&migration.name)
                        .bind(&migration.up)
                        .bind(&migration.down)
                        .bind(&migration.checksum)
                        .execute(&mut *self)
                        .await
                        .map(|_| ())
                        .map_err(|e| table.tracking_error("insert", e))
                })
            }

            fn delete_row<'a>(
                &'a mut self,
                table: &'a $crate::table::TrackingTable,
                migration_id: i64,
            ) -> ::strata_contracts::BoxFuture<'a, Result<(), $crate::error::ExecutorError>> {
                Box::pin(async move {
                    ::sqlx::query(&table.delete_sql())
                        .bind(migration_id)
                        .execute(&mut *self)
                        .await
                        .map(|_| ())
                        .map_err(|e| table.tracking_error("delete", e))
                })
            }
        }
    };
}

pub(crate) use tracking_connection;

/// One owned connection used as the migration session. Closing it ends the session.
pub struct SqlxStore<C> {
    conn: Option<C>,
}

impl<C: TrackingConnection> SqlxStore<C> {
    pub fn from_connection(conn: C) -> Self {
        Self { conn: Some(conn) }
    }

    fn conn(&mut self) -> Result<&mut C, ExecutorError> {
        self.conn.as_mut().ok_or(ExecutorError::SessionClosed)
    }

    pub async fn list(&mut self, table: &str) -> Result<Vec<AppliedMigration>, ExecutorError> {
        let table = TrackingTable::new(table, C::DIALECT)?;
        self.conn()?.read_applied(&table).await
    }

    pub async fn apply(
        &mut self,
        table: &str,
        migration: &Migration,
        options: ApplyOptions,
    ) -> Result<(), ExecutorError> {
        let table = TrackingTable::new(table, C::DIALECT)?;
        let migration_id = migration.id;
        let mut tx = transaction::begin(self.conn()?, migration_id).await?;

        if let Err(err) = apply_in(&mut *tx, &table, migration, options).await {
            return Err(transaction::abort(tx, migration_id, err).await);
        }

        transaction::commit(tx, migration_id).await
    }

    pub async fn revert(&mut self, table: &str, migration: &AppliedMigration) -> Result<(), ExecutorError> {
        let table = TrackingTable::new(table, C::DIALECT)?;
        let migration_id = migration.id;
        let mut tx = transaction::begin(self.conn()?, migration_id).await?;

        if let Err(err) = revert_in(&mut *tx, &table, migration).await {
            return Err(transaction::abort(tx, migration_id, err).await);
        }

        transaction::commit(tx, migration_id).await
    }

    pub async fn shutdown(&mut self) -> Result<(), ExecutorError> {
        let conn = self.conn.take().ok_or(ExecutorError::SessionClosed)?;
        conn.close().await.map_err(|e| ExecutorError::CloseFailed {
            message: e.to_string(),
        })
    }
}

async fn apply_in<C: TrackingConnection>(
    conn: &mut C,
    table: &TrackingTable,
    migration: &Migration,
    options: ApplyOptions,
) -> Result<(), ExecutorError> {
    let id = migration.id;
    conn.execute_body(id, BodyStep::Up, &migration.up).await?;

    if options.verify_reversibility {
        conn.execute_body(id, BodyStep::VerifyDown, &migration.down).await?;
        conn.execute_body(id, BodyStep::VerifyUp, &migration.up).await?;
    }

    conn.insert_row(table, migration).await
}

async fn revert_in<C: TrackingConnection>(
    conn: &mut C,
    table: &TrackingTable,
    migration: &AppliedMigration,
) -> Result<(), ExecutorError> {
    conn.execute_body(migration.id, BodyStep::Down, &migration.down).await?;
    conn.delete_row(table, migration.id).await
}
