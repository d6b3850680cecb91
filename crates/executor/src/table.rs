use crate::error::ExecutorError;
use strata_migration::AppliedMigration;

/// `(id, name, up, down, checksum)` as selected from a tracking table.
pub type TrackingRow = (i64, String, String, String, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Sqlite => "?".to_string(),
            Dialect::Postgres => format!("${index}"),
        }
    }
}

/// SQL for one tracking table. The name is validated once and always emitted quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingTable {
    name: String,
    dialect: Dialect,
}

impl TrackingTable {
    pub fn new(name: &str, dialect: Dialect) -> Result<Self, ExecutorError> {
        if !is_identifier(name) {
            return Err(ExecutorError::InvalidTableName {
                table: name.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            dialect,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn create_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" (
    id BIGINT PRIMARY KEY,
    name TEXT NOT NULL,
    up TEXT NOT NULL,
    down TEXT NOT NULL,
    checksum TEXT NOT NULL
)",
            self.name
        )
    }

    pub fn select_sql(&self) -> String {
        format!(
            "SELECT id, name, up, down, checksum FROM \"{}\" ORDER BY id ASC",
            self.name
        )
    }

    pub fn insert_sql(&self) -> String {
        let p: Vec<String> = (1..=5).map(|i| self.dialect.placeholder(i)).collect();
        format!(
            "INSERT INTO \"{}\" (id, name, up, down, checksum) VALUES ({})",
            self.name,
            p.join(", ")
        )
    }

    pub fn delete_sql(&self) -> String {
        format!(
            "DELETE FROM \"{}\" WHERE id = {}",
            self.name,
            self.dialect.placeholder(1)
        )
    }

    pub fn tracking_error(&self, operation: &'static str, err: impl ToString) -> ExecutorError {
        ExecutorError::TrackingFailed {
            table: self.name.clone(),
            operation,
            message: err.to_string(),
        }
    }
}

pub fn into_applied((id, name, up, down, checksum): TrackingRow) -> AppliedMigration {
    AppliedMigration {
        id,
        name,
        up,
        down,
        checksum,
    }
}

pub fn connect_error(err: sqlx::Error) -> ExecutorError {
    ExecutorError::ConnectFailed {
        message: err.to_string(),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
