use crate::error::{Result as ServerErrorResult, ServerError};

use idlink_config::LoggingConfig;

use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record, info};

/// HTTP client internals stay quiet unless something goes wrong.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "h2"];

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stdout { colored: bool },
    File(PathBuf),
}

impl LogSink {
    /// A resolved file path wins over stdout; colors only apply to stdout.
    pub fn from_config(config: &LoggingConfig, log_file: Option<PathBuf>) -> Self {
        match log_file {
            Some(path) => Self::File(path),
            None => Self::Stdout {
                colored: config.colored,
            },
        }
    }
}

impl fmt::Display for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout { .. } => write!(f, "stdout"),
            Self::File(path) => write!(f, "file={}", path.display()),
        }
    }
}

/// Install the global logger and bridge sqlx's tracing events into it.
pub fn initialize(config: &LoggingConfig, log_file: Option<PathBuf>) -> ServerErrorResult<()> {
    let level = config.level.0;
    let sink = LogSink::from_config(config, log_file);

    build_dispatch(level, &sink)?
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    info!("Logger initialized: level={level:?}, {sink}");

    tracing_log::LogTracer::init().ok();

    Ok(())
}

pub(crate) fn build_dispatch(level: LevelFilter, sink: &LogSink) -> ServerErrorResult<Dispatch> {
    let dispatch = QUIET_TARGETS
        .iter()
        .fold(Dispatch::new().level(level), |dispatch, target| {
            dispatch.level_for(*target, level.min(LevelFilter::Warn))
        });

    let dispatch = match sink {
        LogSink::Stdout { colored: true } => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            dispatch
                .format(move |out, message, record| {
                    write_line(out, message, record, colors.color(record.level()))
                })
                .chain(std::io::stdout())
        }
        LogSink::Stdout { colored: false } => dispatch
            .format(|out, message, record| write_line(out, message, record, record.level()))
            .chain(std::io::stdout()),
        LogSink::File(path) => {
            let file = fern::log_file(path).map_err(|e| ServerError::Logger {
                message: format!("Failed to open log file {}: {e}", path.display()),
            })?;

            dispatch
                .format(|out, message, record| write_line(out, message, record, record.level()))
                .chain(file)
        }
    };

    Ok(dispatch)
}

fn write_line(
    out: FormatCallback<'_>,
    message: &fmt::Arguments<'_>,
    record: &Record<'_>,
    level: impl fmt::Display,
) {
    out.finish(format_args!(
        "[{date} {level} {target}] {message} [{file}:{line}]",
        date = humantime::format_rfc3339_millis(SystemTime::now()),
        target = record.target(),
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}
