use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strata_core::{MigratorConfig, DEFAULT_TABLE_NAME};

#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Checksum-verified, forward-only SQL migrations")]
pub struct Cli {
    /// sqlite: or postgres: connection url.
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Directory holding `<id>.<name>.sql` files.
    #[arg(long, env = "STRATA_MIGRATIONS_DIR", default_value = "migrations", global = true)]
    pub migrations_dir: PathBuf,

    /// Tracking table name.
    #[arg(long, env = "STRATA_TABLE", default_value = DEFAULT_TABLE_NAME, global = true)]
    pub table: String,

    /// Roll back and replay edited migrations instead of refusing to run.
    #[arg(long, env = "STRATA_DEVELOPMENT", global = true)]
    pub development: bool,

    /// Log filter; falls back to RUST_LOG, then `info`.
    #[arg(long, env = "STRATA_LOG", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn migrator_config(&self) -> MigratorConfig {
        MigratorConfig::new(&self.migrations_dir)
            .with_table_name(&self.table)
            .with_development(self.development)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile the database with the migrations directory.
    Migrate(MigrateArgs),
    /// Show which migrations are applied, pending or edited.
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MigrateArgs {
    /// Print the plan without reverting or applying anything.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {}
