use strata_core::MigrateError;
use strata_executor::ExecutorError;
use strata_migration::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    UserError = 1,
    MigrationFailed = 2,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// A failure ready for the terminal: a title plus optional reason, meaning and suggested
/// action, and the process exit code.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{title}")]
pub struct CliError {
    code: ExitCode,
    title: String,
    reason: Option<String>,
    meaning: Option<String>,
    action: Option<String>,
}

impl CliError {
    fn new(code: ExitCode, title: impl Into<String>) -> Self {
        Self {
            code,
            title: title.into(),
            reason: None,
            meaning: None,
            action: None,
        }
    }

    pub fn user_error(title: impl Into<String>) -> Self {
        Self::new(ExitCode::UserError, title)
    }

    pub fn migration_failed(title: impl Into<String>) -> Self {
        Self::new(ExitCode::MigrationFailed, title)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = Some(meaning.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn meaning(&self) -> Option<&str> {
        self.meaning.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn exit_code(&self) -> i32 {
        self.code.as_i32()
    }
}

impl From<MigrateError> for CliError {
    fn from(err: MigrateError) -> Self {
        let reason = err.to_string();
        match err {
            MigrateError::Load(LoadError::Io { .. }) => CliError::user_error("Could not read the migrations directory")
                .with_reason(reason)
                .with_action("Check --migrations-dir (or STRATA_MIGRATIONS_DIR) points at a readable directory."),
            MigrateError::Load(LoadError::Series { expected, .. }) => {
                CliError::user_error("Migration numbering has a gap or a duplicate")
                    .with_reason(reason)
                    .with_meaning("Migration ids must run 1, 2, 3, … without gaps; nothing was applied.")
                    .with_action(format!("Add or renumber the file so that migration {expected} exists exactly once."))
            }
            MigrateError::Load(LoadError::MissingSection { id, section, .. }) => {
                CliError::user_error(format!("Migration {id} has no {section} section"))
                    .with_reason(reason)
                    .with_meaning("Every migration needs both an up and a down body; nothing was applied.")
                    .with_action(format!("Wrap the body in `-- {section}:begin` and `-- {section}:end` markers."))
            }
            MigrateError::Load(LoadError::InvalidId { filename, .. }) => {
                CliError::user_error(format!("Migration file '{filename}' has an id that is too large"))
                    .with_reason(reason)
                    .with_meaning("Nothing was applied.")
                    .with_action("Rename the file so its id continues the 1, 2, 3, … series.")
            }
            MigrateError::ChecksumMismatch { id } => {
                CliError::migration_failed(format!("Migration {id} was changed after it was applied"))
                    .with_reason(reason)
                    .with_meaning("The database was left untouched.")
                    .with_action("Restore the original file, or pass --development to roll back and replay it.")
            }
            MigrateError::AppliedState { .. } => CliError::migration_failed("Could not read the tracking table")
                .with_reason(reason)
                .with_action("Check the --table name and that the database user may create tables."),
            MigrateError::Execution { id, operation, .. } => {
                CliError::migration_failed(format!("Migration failed at {id} ({operation})"))
                    .with_reason(reason)
                    .with_meaning(format!(
                        "Migration {id} was rolled back; migrations completed before it stay committed."
                    ))
                    .with_action("Fix the migration and run `strata migrate` again.")
            }
            MigrateError::Close { .. } => CliError::migration_failed("Migrations applied, but closing the connection failed")
                .with_reason(reason),
        }
    }
}

impl From<ExecutorError> for CliError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::UnsupportedUrl { .. } => CliError::user_error("Unsupported database url")
                .with_reason(err.to_string())
                .with_action("Use a sqlite: or postgres: url."),
            _ => CliError::user_error("Database connection failed").with_reason(err.to_string()),
        }
    }
}
