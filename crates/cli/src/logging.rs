use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. `directive` wins over `RUST_LOG`; with neither,
/// only `info` and above is shown. Logs go to stderr so command output stays clean.
pub fn init(directive: Option<&str>) {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
