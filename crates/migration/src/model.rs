use crate::checksum::checksum;

/// One numbered migration file, parsed and hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub id: i64,
    pub name: String,
    pub filename: String,
    pub up: String,
    pub down: String,
    pub checksum: String,
}

impl Migration {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        filename: impl Into<String>,
        up: impl Into<String>,
        down: impl Into<String>,
    ) -> Self {
        let up = up.into();
        let down = down.into();
        let checksum = checksum(&up, &down);

        Self {
            id,
            name: name.into(),
            filename: filename.into(),
            up,
            down,
            checksum,
        }
    }
}

/// A row of the tracking table: a migration as it was when it got applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub id: i64,
    pub name: String,
    pub up: String,
    pub down: String,
    pub checksum: String,
}

impl From<&Migration> for AppliedMigration {
    fn from(m: &Migration) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            up: m.up.clone(),
            down: m.down.clone(),
            checksum: m.checksum.clone(),
        }
    }
}
