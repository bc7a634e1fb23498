use clap::Parser;

/// List available datasets.
#[derive(Clone, Debug, Default, Parser, PartialEq)]
#[clap(verbatim_doc_comment)]
pub struct Args {}
