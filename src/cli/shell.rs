use clap::Parser;

/// Start an interactive shell.
///
/// The shell accepts the same commands as the command line, plus
/// 'help', 'loglevel' and 'exit'.
#[derive(Clone, Debug, Default, Parser, PartialEq)]
#[clap(verbatim_doc_comment)]
pub struct Args {}
