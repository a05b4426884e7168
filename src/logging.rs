//! Logging setup: console output plus an append-only `hosts.log`.
//!
//! File lines look like:
//!
//! ```text
//! 2024-03-05 12:00:01,123 [INFO] [hostsmate::suspender] - Adblocking has been resumed
//! ```

use chrono::Local;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{Event, Level, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt as tsfmt, prelude::*, EnvFilter};

/// Name of the log file inside the log directory
pub const LOG_FILE_NAME: &str = "hosts.log";

/// Directives for the file layer: everything from this crate, only
/// warnings from dependencies
const FILE_DIRECTIVES: &str = "warn,hostsmate=debug";

static INITIALIZED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// `timestamp [LEVEL] [target] - message`
pub struct HostsLogFormat;

impl<S, N> FormatEvent<S, N> for HostsLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} [{}] [{}] - ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            meta.level(),
            meta.target()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Initialize logging. Only the first call has an effect; later calls
/// return the log file chosen by the first one.
///
/// A log directory that cannot be created degrades to console-only logging.
pub fn init(verbose: bool, quiet: bool, log_dir: &Path) -> Option<PathBuf> {
    INITIALIZED
        .get_or_init(|| install(verbose, quiet, log_dir))
        .clone()
}

fn install(verbose: bool, quiet: bool, log_dir: &Path) -> Option<PathBuf> {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let console_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let console_layer = tsfmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(console_filter);

    let file_appender = match open_log_file(log_dir) {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!(
                "Warning: logging to {:?} disabled: {}",
                log_dir.join(LOG_FILE_NAME),
                e
            );
            None
        }
    };
    let log_path = file_appender
        .as_ref()
        .map(|_| log_dir.join(LOG_FILE_NAME));

    let file_layer = file_appender.map(|appender| {
        tsfmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .event_format(HostsLogFormat)
            .with_filter(EnvFilter::new(FILE_DIRECTIVES))
    });

    // Fails only if another subscriber was installed first (tests)
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();

    log_path
}

fn open_log_file(log_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)?;
    Ok(appender)
}
