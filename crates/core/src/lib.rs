pub mod config;
pub mod error;
pub mod migrator;
pub mod plan;

pub use config::{MigratorConfig, DEFAULT_TABLE_NAME};
pub use error::{BoxError, MigrateError, Operation};
pub use migrator::{Migrator, RunReport};
pub use plan::{find_divergence, ReconciliationPlan};
