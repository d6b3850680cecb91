use clap::Parser;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = strata_cli::Cli::parse();
    strata_cli::logging::init(cli.log_level.as_deref());

    let result = match &cli.command {
        strata_cli::Command::Migrate(args) => strata_cli::migrate::run(&cli, args).await,
        strata_cli::Command::Status(args) => strata_cli::status::run(&cli, args).await,
    };

    if let Err(err) = result {
        strata_cli::error_view::print(&err);
        std::process::exit(err.exit_code());
    }
}
