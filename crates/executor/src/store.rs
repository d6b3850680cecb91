use crate::error::ExecutorError;
use crate::postgres::PgStore;
use crate::sqlite::SqliteStore;
use strata_contracts::{ApplyOptions, BoxFuture, MigrationStore};
use strata_migration::{AppliedMigration, Migration};

/// A store picked at runtime from the scheme of a database url.
pub enum Store {
    Sqlite(SqliteStore),
    Postgres(PgStore),
}

impl Store {
    pub async fn connect(database_url: &str) -> Result<Self, ExecutorError> {
        match Backend::from_url(database_url)? {
            Backend::Sqlite => Ok(Store::Sqlite(SqliteStore::connect(database_url).await?)),
            Backend::Postgres => Ok(Store::Postgres(PgStore::connect(database_url).await?)),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            Store::Sqlite(_) => Backend::Sqlite,
            Store::Postgres(_) => Backend::Postgres,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn from_url(database_url: &str) -> Result<Self, ExecutorError> {
        let scheme = database_url
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default();

        match scheme.as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            _ => Err(ExecutorError::UnsupportedUrl {
                url: redact(database_url),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Postgres => "postgres",
        }
    }
}

/// Drops everything after the scheme so credentials never reach error output.
fn redact(database_url: &str) -> String {
    match database_url.split_once(':') {
        Some((scheme, _)) => format!("{scheme}:…"),
        None => "<no scheme>".to_string(),
    }
}

impl MigrationStore for Store {
    type Error = ExecutorError;

    fn list_migrations<'a>(
        &'a mut self,
        table: &'a str,
    ) -> BoxFuture<'a, Result<Vec<AppliedMigration>, Self::Error>> {
        Box::pin(async move {
            match self {
                Store::Sqlite(s) => s.list(table).await,
                Store::Postgres(s) => s.list(table).await,
            }
        })
    }

    fn apply_migration<'a>(
        &'a mut self,
        table: &'a str,
        migration: &'a Migration,
        options: ApplyOptions,
    ) -> BoxFuture<'a, Result<(), Self::Error>> {
        Box::pin(async move {
            match self {
                Store::Sqlite(s) => s.apply(table, migration, options).await,
                Store::Postgres(s) => s.apply(table, migration, options).await,
            }
        })
    }

    fn revert_migration<'a>(
        &'a mut self,
        table: &'a str,
        migration: &'a AppliedMigration,
    ) -> BoxFuture<'a, Result<(), Self::Error>> {
        Box::pin(async move {
            match self {
                Store::Sqlite(s) => s.revert(table, migration).await,
                Store::Postgres(s) => s.revert(table, migration).await,
            }
        })
    }

    fn close<'a>(&'a mut self) -> BoxFuture<'a, Result<(), Self::Error>> {
        Box::pin(async move {
            match self {
                Store::Sqlite(s) => s.shutdown().await,
                Store::Postgres(s) => s.shutdown().await,
            }
        })
    }
}
