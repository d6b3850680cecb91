use std::path::{Path, PathBuf};

pub const DEFAULT_TABLE_NAME: &str = "migrations";

/// Per-run settings. Nothing here is global; two migrators with different configs can run
/// side by side against independent stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratorConfig {
    pub table_name: String,
    pub migrations_path: PathBuf,
    pub development: bool,
}

impl MigratorConfig {
    pub fn new(migrations_path: impl AsRef<Path>) -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            migrations_path: migrations_path.as_ref().to_path_buf(),
            development: false,
        }
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }
}
