// ==========================================
// Zuidplas Logistics - Logging Setup
// ==========================================
// tracing + tracing-subscriber
// Level filter from RUST_LOG (default: info)
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Initialise the logging system with plain-text output.
///
/// # Environment
/// - RUST_LOG: level filter (default: info),
///   e.g. `RUST_LOG=debug` or `RUST_LOG=zuidplas_logistics=trace`
///
/// # Example
/// ```no_run
/// use zuidplas_logistics::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with(LogFormat::Text);
}

/// Initialise the logging system; logs go to stderr so that stdout
/// stays free for the report.
pub fn init_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Logging for tests: debug level, captured by the test harness.
/// Safe to call more than once.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
