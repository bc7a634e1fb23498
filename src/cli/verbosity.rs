use color_eyre::eyre::{eyre, Report, Result};
use color_eyre::Help;
use itertools::Itertools;
use log::LevelFilter;
use std::str::FromStr;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Log level names accepted from the environment and the config file.
#[derive(Clone, Copy, Debug, Default, Display, EnumIter, PartialEq)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Verbosity {
    Critical,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
    NotSet,
}

impl Verbosity {
    /// Most verbose level that is still emitted.
    ///
    /// Nothing is logged above ERROR, so CRITICAL silences the logger.
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Critical => LevelFilter::Off,
            Verbosity::Error => LevelFilter::Error,
            Verbosity::Warning => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::NotSet => LevelFilter::Trace,
        }
    }
}

impl FromStr for Verbosity {
    type Err = Report;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Verbosity::iter()
            .find(|verbosity| verbosity.to_string().eq_ignore_ascii_case(input.trim()))
            .ok_or_else(|| {
                eyre!("Unknown log level {input}.").suggestion(format!(
                    "Please choose from: {}",
                    Verbosity::iter().join(", ")
                ))
            })
    }
}
