//! sqlx-backed implementations of [`strata_contracts::MigrationStore`].

pub mod error;
pub mod postgres;
pub mod session;
pub mod sqlite;
pub mod store;
pub mod table;
pub mod transaction;

pub use error::{BodyStep, ExecutorError};
pub use postgres::PgStore;
pub use session::{SqlxStore, TrackingConnection};
pub use sqlite::SqliteStore;
pub use store::{Backend, Store};
pub use table::{Dialect, TrackingTable};
