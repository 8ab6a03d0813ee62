// vidpress-cli/src/logging.rs
//
// Logging setup for the CLI. Uses the standard `log` facade with
// `env_logger` as the backend; verbosity is controlled through RUST_LOG
// (info by default, debug/trace for troubleshooting).

use env_logger::Env;

/// Initializes env_logger with an info default filter.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
#[must_use]
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}
