//! Subscriber setup for the binary
//!
//! Logs always go to stderr so that stdout stays clean for command output.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directives, e.g. `goenv_resolve=debug`
pub const GOENV_LOG_ENV: &str = "GOENV_LOG";

/// `json` selects structured output
pub const GOENV_LOG_FORMAT_ENV: &str = "GOENV_LOG_FORMAT";

const DEBUG_LEVEL: &str = "debug";
const DEFAULT_LEVEL: &str = "warn";

/// Install the global subscriber.
///
/// The returned guard flushes buffered lines on drop and must be held until
/// the process exits.
pub fn init(debug: bool) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = env_filter(std::env::var(GOENV_LOG_ENV).ok(), debug);
    let json = is_json_format(std::env::var(GOENV_LOG_FORMAT_ENV).ok().as_deref());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(writer).with_target(true))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .init();
    }

    guard
}

fn env_filter(directives: Option<String>, debug: bool) -> EnvFilter {
    let fallback = if debug { DEBUG_LEVEL } else { DEFAULT_LEVEL };
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

fn is_json_format(format: Option<&str>) -> bool {
    format.is_some_and(|format| format.eq_ignore_ascii_case("json"))
}
