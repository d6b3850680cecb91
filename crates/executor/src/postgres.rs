use crate::error::ExecutorError;
use crate::session::{tracking_connection, SqlxStore};
use crate::table::connect_error;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::ConnectOptions;
use std::str::FromStr;

/// One PostgreSQL connection used as the migration session.
pub type PgStore = SqlxStore<PgConnection>;

tracking_connection!(PgConnection, Postgres);

impl PgStore {
    pub async fn connect(url: &str) -> Result<Self, ExecutorError> {
        let options = PgConnectOptions::from_str(url).map_err(connect_error)?;
        let conn = options.connect().await.map_err(connect_error)?;
        Ok(Self::from_connection(conn))
    }
}
