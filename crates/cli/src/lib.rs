pub mod args;
pub mod error;
pub mod error_view;
pub mod logging;
pub mod migrate;
pub mod output;
pub mod session;
pub mod status;
pub mod style;
pub mod ui;

pub use args::{Cli, Command, MigrateArgs, StatusArgs};
pub use error::CliError;
