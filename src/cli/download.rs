use clap::Parser;
use std::path::PathBuf;

/// Download a dataset revision.
///
/// Files are written to the top level of the target directory.
#[derive(Clone, Debug, Parser, PartialEq)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Dataset name.
    pub dataset: String,

    /// Dataset revision.
    pub revision: String,

    /// Target directory.
    ///
    /// If the directory does not exist, it will be created.
    pub target_directory: PathBuf,
}
