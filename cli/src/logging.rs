//! Tracing subscriber setup.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs a stderr subscriber. WARN by default, DEBUG when `verbose`,
/// ERROR when `quiet`.
pub fn initialize_logging(verbose: bool, quiet: bool) -> Result<(), String> {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| format!("Failed to install logger: {err}"))
}
