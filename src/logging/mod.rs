use crate::cli::verbosity::Verbosity;
use color_eyre::eyre::{Report, Result, WrapErr};
use env_logger::{fmt::Formatter, Builder, Target};
use log::{Level, LevelFilter, Record};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable holding the log level name.
pub const LOGLEVEL_ENV: &str = "DJARCHIVE_LOGLEVEL";
pub const DEFAULT_LOGLEVEL: &str = "INFO";

/// Logger of the command dispatcher.
pub const DISPATCH_TARGET: &str = "djarchive";
/// Logger of the archive client.
pub const CLIENT_TARGET: &str = "djarchive::archive";

/// Pick the log level name: environment, then config, then the default.
pub fn resolve_level(env: Option<String>, config: Option<&str>) -> String {
    env.or_else(|| config.map(String::from))
        .unwrap_or_else(|| DEFAULT_LOGLEVEL.to_string())
}

/// Install the global logger and return the context describing it.
pub fn init(level: &str, logfile: Option<&Path>) -> Result<LogContext, Report> {
    let verbosity = Verbosity::from_str(level)?;
    let context = LogContext::new(verbosity, logfile.map(Path::to_path_buf));

    context
        .builder()?
        .try_init()
        .wrap_err("Failed to initialize logging.")?;

    Ok(context)
}

// ----------------------------------------------------------------------------
// Log Context

/// Resolved logging settings, handed to the command handlers.
#[derive(Clone, Debug, PartialEq)]
pub struct LogContext {
    pub verbosity: Verbosity,
    pub logfile: Option<PathBuf>,
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new(Verbosity::default(), None)
    }
}

impl LogContext {
    pub fn new(verbosity: Verbosity, logfile: Option<PathBuf>) -> Self {
        LogContext { verbosity, logfile }
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.verbosity.level_filter()
    }

    /// Logger builder: console output, plus the log file if one is set.
    ///
    /// Everything outside the dispatcher and the client stays at ERROR.
    pub fn builder(&self) -> Result<Builder, Report> {
        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Error)
            .filter_module(DISPATCH_TARGET, self.level_filter())
            .filter_module(CLIENT_TARGET, self.level_filter())
            .format(format_record);

        match &self.logfile {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .wrap_err_with(|| format!("Failed to open log file: {path:?}"))?;
                builder.target(Target::Pipe(Box::new(Tee { file })));
            }
            None => {
                builder.target(Target::Stderr);
            }
        }

        Ok(builder)
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level: {}", self.verbosity)?;
        if let Some(logfile) = &self.logfile {
            write!(f, ", logfile: {}", logfile.display())?;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Output

/// 2024-01-31 12:00:00:INFO:djarchive::dispatch:message
fn format_record(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let level = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    writeln!(
        buf,
        "{}:{}:{}:{}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        level,
        record.module_path().unwrap_or(record.target()),
        record.args()
    )
}

/// Writes every record to stderr and the log file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}
