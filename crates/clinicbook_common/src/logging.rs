//! Logging utilities for the Clinicbook services.
//!
//! Every binary calls `init_from_config` once at startup. Output
//! goes to stdout and, when a directory is configured, to a daily rolling
//! file as well. A set `RUST_LOG` replaces the configured level.

use clinicbook_config::LoggingConfig;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// File name prefix used by the rolling file appender.
pub const LOG_FILE_NAME: &str = "clinicbook.log";

const CRATE_TARGETS: &[&str] = &[
    "clinicbook_backend",
    "clinicbook_booking",
    "clinicbook_common",
    "clinicbook_config",
    "clinicbook_sheets",
    "booking_wizard",
];

/// Initialize logging from the `[logging]` config section.
///
/// ```no_run
/// use clinicbook_common::logging;
/// use clinicbook_config::LoggingConfig;
///
/// let _guard = logging::init_from_config(&LoggingConfig::default());
/// ```
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = Level::from_str(&config.level).unwrap_or(Level::INFO);
    install(level, config.directory.as_deref())
}

fn install(level: Level, directory: Option<&str>) -> Option<WorkerGuard> {
    // RUST_LOG wins; otherwise every clinicbook_* crate logs at `level`
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => CRATE_TARGETS
            .iter()
            .filter_map(|target| format!("{target}={level}").parse::<Directive>().ok())
            .fold(EnvFilter::new("warn"), EnvFilter::add_directive),
    };

    let (file_layer, guard) = match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    // try_init: a subscriber may already be installed (tests, embedding)
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(file_layer)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
    guard
}
