use crate::args::{Cli, MigrateArgs};
use crate::error::CliError;
use crate::output;
use crate::session;
use crate::style::Style;
use crate::ui::Ui;
use std::collections::HashMap;
use strata_core::{MigrateError, ReconciliationPlan};
use strata_migration::load_migrations;

pub async fn run(cli: &Cli, args: &MigrateArgs) -> Result<(), CliError> {
    let mut migrator = session::open(cli).await?;
    let ui = Ui::new(Style::detect());

    if args.dry_run {
        let plan = migrator.plan().await?;
        print_plan(cli, &ui, &plan);

        if let Some(id) = plan.divergence.filter(|_| plan.is_blocked(cli.development)) {
            return Err(MigrateError::ChecksumMismatch { id }.into());
        }
        return Ok(());
    }

    let report = migrator.execute().await?;

    output::block(ui.header("strata migrate"));
    output::block([
        ui.kv("mode", mode(cli.development)),
        ui.kv("reverted", &report.reverted.len().to_string()),
        ui.kv("applied", &report.applied.len().to_string()),
        ui.rule(),
    ]);

    if report.reverted.is_empty() && report.applied.is_empty() {
        output::line(ui.ok_line("database is up to date"));
    } else {
        output::line(ui.ok_line("migrations complete"));
    }

    Ok(())
}

fn print_plan(cli: &Cli, ui: &Ui, plan: &ReconciliationPlan) {
    // Names are cosmetic here; a load error would already have failed `plan`.
    let names: HashMap<i64, String> = load_migrations(&cli.migrations_dir)
        .map(|ms| ms.into_iter().map(|m| (m.id, m.name)).collect())
        .unwrap_or_default();
    let name = |id: &i64| names.get(id).map(String::as_str).unwrap_or("<missing file>");

    output::block(ui.header("strata migrate --dry-run"));
    output::line(ui.kv("mode", mode(cli.development)));
    match plan.divergence {
        Some(id) => output::line(ui.kv("diverged at", &id.to_string())),
        None => output::line(ui.kv("diverged at", "none")),
    }
    output::line(ui.rule());

    if plan.is_blocked(cli.development) {
        output::line("edited migrations block this run outside development mode");
        return;
    }

    if plan.is_noop() {
        output::line(ui.ok_line("database is up to date"));
        return;
    }

    for id in &plan.rollback {
        output::line(ui.revert_line(*id, name(id)));
    }
    for id in &plan.apply {
        output::line(ui.apply_line(*id, name(id)));
    }
}

pub(crate) fn mode(development: bool) -> &'static str {
    if development {
        "development"
    } else {
        "production"
    }
}
