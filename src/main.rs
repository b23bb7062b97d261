use miette::Result;
use tracing_subscriber::EnvFilter;

/// Main entry point for the unwire CLI tool
fn main() -> Result<()> {
    // Install miette's panic and error handler for beautiful error reporting
    miette::set_panic_hook();

    // Library diagnostics go to stderr, quiet unless UNWIRE_LOG asks for more
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("UNWIRE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    unwire::run()
}
