use crate::config::MigratorConfig;
use crate::error::{MigrateError, Operation};
use crate::plan::ReconciliationPlan;
use std::collections::BTreeMap;
use strata_contracts::{ApplyOptions, MigrationStore};
use strata_migration::{load_migrations, AppliedMigration, Migration};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Ids reverted because of divergence, in the order they were reverted.
    pub reverted: Vec<i64>,
    /// Ids applied, in the order they were applied.
    pub applied: Vec<i64>,
}

/// Reconciles a migrations directory with the tracking table of one store.
///
/// Each call to [`Migrator::execute`] reloads the files and re-reads the applied state, so
/// re-running after a failure picks up exactly where the store was left.
pub struct Migrator<S> {
    config: MigratorConfig,
    store: S,
}

impl<S> Migrator<S>
where
    S: MigrationStore,
{
    pub fn new(config: MigratorConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &MigratorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Computes what [`Migrator::execute`] would do without reverting or applying anything.
    pub async fn plan(&mut self) -> Result<ReconciliationPlan, MigrateError> {
        let migrations = load_migrations(&self.config.migrations_path)?;
        if migrations.is_empty() {
            return Ok(ReconciliationPlan::default());
        }

        let applied = self.list_applied().await?;
        let applied: Vec<AppliedMigration> = applied.into_values().collect();
        Ok(ReconciliationPlan::compute(&migrations, &applied))
    }

    pub async fn execute(&mut self) -> Result<RunReport, MigrateError> {
        let migrations = load_migrations(&self.config.migrations_path)?;
        if migrations.is_empty() {
            tracing::info!("no migrations found, nothing to do");
            return Ok(RunReport::default());
        }

        let mut applied = self.list_applied().await?;
        let snapshot: Vec<AppliedMigration> = applied.values().cloned().collect();
        let plan = ReconciliationPlan::compute(&migrations, &snapshot);

        let mut report = RunReport::default();

        if let Some(id) = plan.divergence {
            if !self.config.development {
                tracing::error!(id, "migration has a checksum mismatch, aborting");
                return Err(MigrateError::ChecksumMismatch { id });
            }

            tracing::warn!(id, "migration has a checksum mismatch, rolling back");
            for rollback_id in &plan.rollback {
                let Some(record) = applied.remove(rollback_id) else {
                    continue;
                };
                self.revert(&record).await?;
                report.reverted.push(record.id);
            }
        }

        for migration in pending(&migrations, &applied) {
            self.apply(migration).await?;
            report.applied.push(migration.id);
        }

        self.store
            .close()
            .await
            .map_err(|e| MigrateError::Close { source: Box::new(e) })?;

        tracing::info!(
            reverted = report.reverted.len(),
            applied = report.applied.len(),
            "migrations complete"
        );

        Ok(report)
    }

    async fn list_applied(&mut self) -> Result<BTreeMap<i64, AppliedMigration>, MigrateError> {
        let table = self.config.table_name.as_str();
        let rows = self
            .store
            .list_migrations(table)
            .await
            .map_err(|e| MigrateError::AppliedState {
                table: table.to_string(),
                source: Box::new(e),
            })?;

        tracing::debug!(table, count = rows.len(), "read applied migrations");
        Ok(rows.into_iter().map(|row| (row.id, row)).collect())
    }

    async fn revert(&mut self, record: &AppliedMigration) -> Result<(), MigrateError> {
        tracing::info!(id = record.id, name = %record.name, "rolling back migration");
        self.store
            .revert_migration(&self.config.table_name, record)
            .await
            .map_err(|e| MigrateError::Execution {
                id: record.id,
                operation: Operation::Revert,
                source: Box::new(e),
            })
    }

    async fn apply(&mut self, migration: &Migration) -> Result<(), MigrateError> {
        tracing::info!(id = migration.id, name = %migration.name, "applying migration");
        let options = ApplyOptions {
            verify_reversibility: self.config.development,
        };

        self.store
            .apply_migration(&self.config.table_name, migration, options)
            .await
            .map_err(|e| MigrateError::Execution {
                id: migration.id,
                operation: Operation::Apply,
                source: Box::new(e),
            })
    }
}

/// Loaded migrations missing from `applied`, in ascending id order.
fn pending<'a>(
    migrations: &'a [Migration],
    applied: &'a BTreeMap<i64, AppliedMigration>,
) -> impl Iterator<Item = &'a Migration> + 'a {
    migrations.iter().filter(|m| !applied.contains_key(&m.id))
}
