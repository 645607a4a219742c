use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_DIR: &str = "logs";

/// Initializes tracing with a console layer and a daily-rotated JSON file layer.
///
/// `verbose` lowers the crate's default level from info to debug; the
/// `RUST_LOG` environment variable still takes precedence for fine tuning.
pub fn init_logging(verbose: bool) {
    let _ = fs::create_dir_all(LOG_DIR);

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, "resolver.log");
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let default_level = if verbose {
        "deck_resolver=debug"
    } else {
        "deck_resolver=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(default_level.parse().unwrap()))
        .with(file_layer)
        .with(console_layer)
        .init();

    // Keep the appender guard alive for the process lifetime so buffered
    // log lines are flushed on exit.
    std::mem::forget(guard);
}
