//! Console plus daily-rotated file logging.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_PREFIX: &str = "kaiten.log";
const DEFAULT_LEVEL: &str = "info";

/// Filter directives: an explicit level or directive list wins, then
/// `RUST_LOG`, then `info` for this application's crates.
pub fn filter(level: Option<&str>) -> EnvFilter {
    if let Some(level) = level {
        return EnvFilter::new(directives(level));
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(DEFAULT_LEVEL)))
}

/// A bare level applies to our crates only; anything with `=` or `,` is
/// passed through as-is.
fn directives(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    format!("kaiten={level},kaiten_core={level},kaiten_api={level},reqwest=warn,hyper=warn")
}

/// Install the global subscriber. The returned guard flushes the file
/// writer and must live until exit.
pub fn init(level: Option<&str>, log_dir: &Path) -> Option<WorkerGuard> {
    let console = fmt::layer().with_target(true);

    let (file_layer, guard) = match std::fs::create_dir_all(log_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("kaiten: cannot create log directory {}: {e}", log_dir.display());
            (None, None)
        }
    };

    let result = tracing_subscriber::registry()
        .with(filter(level))
        .with(console)
        .with(file_layer)
        .try_init();

    if let Err(e) = result {
        eprintln!("kaiten: logging already initialized: {e}");
    }
    tracing::info!(log_dir = %log_dir.display(), "Logging initialized");
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_scoped_to_app_crates() {
        let d = directives("debug");
        assert!(d.starts_with("kaiten=debug,kaiten_core=debug,kaiten_api=debug"));
        assert!(d.contains("reqwest=warn"));
    }

    #[test]
    fn test_full_directives_pass_through() {
        assert_eq!(directives("kaiten_core=trace"), "kaiten_core=trace");
        assert_eq!(directives("warn,kaiten=debug"), "warn,kaiten=debug");
    }

    #[test]
    fn test_explicit_level_builds_filter() {
        let f = filter(Some("trace"));
        assert!(f.to_string().contains("kaiten=trace"));
    }
}
