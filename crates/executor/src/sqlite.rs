use crate::error::ExecutorError;
use crate::session::{tracking_connection, SqlxStore};
use crate::table::connect_error;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;
use std::str::FromStr;

/// One SQLite connection used as the migration session.
pub type SqliteStore = SqlxStore<SqliteConnection>;

tracking_connection!(SqliteConnection, Sqlite);

impl SqliteStore {
    /// Opens `url`, creating the database file when it does not exist yet.
    pub async fn connect(url: &str) -> Result<Self, ExecutorError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(connect_error)?
            .create_if_missing(true);
        let conn = options.connect().await.map_err(connect_error)?;
        Ok(Self::from_connection(conn))
    }
}
