use crate::args::{Cli, StatusArgs};
use crate::error::CliError;
use crate::migrate::mode;
use crate::output;
use crate::session;
use crate::style::{Color, Style};
use crate::ui::Ui;
use strata_core::ReconciliationPlan;
use strata_migration::{load_migrations, Migration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationState {
    Applied,
    Pending,
    Edited,
    Replay,
}

impl MigrationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationState::Applied => "applied",
            MigrationState::Pending => "pending",
            MigrationState::Edited => "edited",
            MigrationState::Replay => "replay",
        }
    }

    fn color(&self) -> Color {
        match self {
            MigrationState::Applied => Color::Green,
            MigrationState::Pending => Color::Yellow,
            MigrationState::Edited => Color::Red,
            MigrationState::Replay => Color::Dim,
        }
    }
}

/// Classifies every loaded migration against a computed plan.
pub fn classify(migrations: &[Migration], plan: &ReconciliationPlan) -> Vec<(i64, MigrationState)> {
    migrations
        .iter()
        .map(|m| {
            let state = if plan.divergence == Some(m.id) {
                MigrationState::Edited
            } else if plan.rollback.contains(&m.id) {
                MigrationState::Replay
            } else if plan.apply.contains(&m.id) {
                MigrationState::Pending
            } else {
                MigrationState::Applied
            };
            (m.id, state)
        })
        .collect()
}

pub async fn run(cli: &Cli, _args: &StatusArgs) -> Result<(), CliError> {
    let migrations = load_migrations(&cli.migrations_dir).map_err(strata_core::MigrateError::from)?;
    let mut migrator = session::open(cli).await?;
    let plan = migrator.plan().await?;
    let ui = Ui::new(Style::detect());

    output::block(ui.header("strata status"));
    output::line(ui.kv("directory", &cli.migrations_dir.display().to_string()));
    output::line(ui.kv("table", &cli.table));
    output::line(ui.kv("mode", mode(cli.development)));
    output::line(ui.rule());

    for (m, (_, state)) in migrations.iter().zip(classify(&migrations, &plan)) {
        output::line(ui.migration_row(m.id, &m.name, state.as_str(), state.color()));
    }

    let orphaned: Vec<&i64> = plan
        .rollback
        .iter()
        .filter(|id| !migrations.iter().any(|m| m.id == **id))
        .collect();
    for id in orphaned {
        output::line(ui.migration_row(*id, "<missing file>", "orphaned", Color::Red));
    }

    output::line(ui.rule());
    let pending = plan.apply.len();
    match plan.divergence {
        Some(id) if plan.is_blocked(cli.development) => output::line(format!(
            "migration {id} diverged; `strata migrate` will refuse to run"
        )),
        Some(id) => output::line(format!(
            "migration {id} diverged; {} to roll back, {pending} to apply",
            plan.rollback.len()
        )),
        None if pending == 0 => output::line(ui.ok_line("database is up to date")),
        None => output::line(format!("{pending} pending")),
    }

    Ok(())
}
