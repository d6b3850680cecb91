use crate::args::Cli;
use crate::error::CliError;
use strata_core::Migrator;
use strata_executor::Store;

pub fn database_url(cli: &Cli) -> Result<String, CliError> {
    match cli.database_url.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(CliError::user_error("DATABASE_URL is required")
            .with_action("Pass --database-url or set DATABASE_URL (a .env file is read too).")),
    }
}

pub async fn open(cli: &Cli) -> Result<Migrator<Store>, CliError> {
    let database_url = database_url(cli)?;
    let store = Store::connect(&database_url).await?;
    tracing::debug!(backend = store.backend().as_str(), "connected");
    Ok(Migrator::new(cli.migrator_config(), store))
}
