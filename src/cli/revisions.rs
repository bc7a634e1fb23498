use clap::Parser;

/// List revisions.
///
/// If a dataset is not given, list all datasets and their revisions.
#[derive(Clone, Debug, Default, Parser, PartialEq)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Dataset name.
    pub dataset: Option<String>,
}
