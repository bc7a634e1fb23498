pub mod datasets;
pub mod download;
pub mod revisions;
pub mod shell;
pub mod verbosity;

use clap::{Parser, Subcommand};
use indoc::{formatdoc, indoc};
use itertools::Itertools;
use std::ffi::OsString;
use std::path::Path;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumProperty, EnumString, IntoEnumIterator};

// -----------------------------------------------------------------------------
// Action Registry

/// The top-level commands, in the order they are listed in the usage text.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumProperty, EnumString, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    #[strum(props(synopsis = "datasets"))]
    Datasets,
    #[strum(props(synopsis = "revisions [dataset]"))]
    Revisions,
    #[strum(props(synopsis = "download dataset revision target_directory"))]
    Download,
    #[strum(props(synopsis = "shell"))]
    Shell,
}

impl Action {
    pub fn synopsis(&self) -> &'static str {
        self.get_str("synopsis").unwrap_or_default()
    }

    pub fn description(&self) -> &'static str {
        match self {
            Action::Datasets => indoc! {"
                list available datasets"},
            Action::Revisions => indoc! {"
                list revisions for dataset if given.
                if dataset is not given, list all datasets+revisions."},
            Action::Download => indoc! {"
                Retrieve dataset into top-level of target_directory.

                If target_directory does not exist, djarchive will attempt
                to create it prior to downloading the dataset."},
            Action::Shell => indoc! {"
                start an interactive shell"},
        }
    }

    /// Synopsis followed by description, as shown in the usage text.
    pub fn help(&self) -> String {
        format!("{}:\n\n{}", self.synopsis(), self.description())
    }
}

// -----------------------------------------------------------------------------
// Command Line

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// A parsed command together with its arguments.
#[derive(Clone, Debug, PartialEq, Subcommand)]
#[clap(verbatim_doc_comment)]
pub enum Command {
    /// List available datasets.
    Datasets(datasets::Args),

    /// List revisions, optionally for a single dataset.
    Revisions(revisions::Args),

    /// Download a dataset revision into a directory.
    Download(download::Args),

    /// Start an interactive shell.
    Shell(shell::Args),
}

impl Command {
    pub fn action(&self) -> Action {
        match self {
            Command::Datasets(_) => Action::Datasets,
            Command::Revisions(_) => Action::Revisions,
            Command::Download(_) => Action::Download,
            Command::Shell(_) => Action::Shell,
        }
    }
}

/// Parse process arguments into a command.
///
/// Returns `Ok(None)` when the first argument is missing or is not a known
/// action, in which case the caller shows the usage text. Argument errors
/// for a known action (such as the wrong number of arguments to `download`)
/// are returned as `Err`.
pub fn parse<I, T>(args: I) -> Result<Option<Command>, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = args.into_iter().map(Into::into).collect_vec();

    let action = args
        .get(1)
        .and_then(|arg| arg.to_str())
        .and_then(|arg| Action::from_str(arg).ok());
    if action.is_none() {
        return Ok(None);
    }

    let cli = Cli::try_parse_from(args)?;
    Ok(Some(cli.command))
}

/// Basename of the program, falling back to the package name.
pub fn program_name<T: AsRef<std::ffi::OsStr>>(args: &[T]) -> String {
    args.first()
        .and_then(|arg| Path::new(arg.as_ref()).file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Usage text listing every action with its help.
pub fn usage(program: &str) -> String {
    let actions = Action::iter()
        .map(|action| format!("  - {action}:\n\n{}\n", indent(&action.help(), 4)))
        .join("\n");

    formatdoc! {"
        usage: {program} cmd args

        where 'cmd' is one of:

        {actions}
        "}
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .join("\n")
}
