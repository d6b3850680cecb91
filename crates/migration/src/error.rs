use core::fmt;

/// Which delimited body of a migration file is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Up,
    Down,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Up => "up",
            Section::Down => "down",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error while reading '{path}': {message}")]
    Io { path: String, message: String },

    #[error("migration series is not contiguous: expected {expected} but received {actual}")]
    Series { expected: i64, actual: i64 },

    #[error("no {section} in migration {id} ({name})")]
    MissingSection { id: i64, name: String, section: Section },

    #[error("migration file '{filename}' has an unusable id: {message}")]
    InvalidId { filename: String, message: String },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<String>, err: impl fmt::Display) -> Self {
        LoadError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
