pub mod checksum;
pub mod discovery;
pub mod error;
pub mod model;
pub mod sections;
pub mod series;

pub use checksum::checksum;
pub use discovery::{list_migration_files, load_migrations, MigrationFile};
pub use error::{LoadError, Section};
pub use model::{AppliedMigration, Migration};
pub use series::check_series;
