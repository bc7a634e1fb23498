pub mod shell;

use crate::archive::ArchiveClient;
use crate::cli::{self, Command};
use crate::logging::LogContext;
use color_eyre::eyre::{Report, Result};
use log::{debug, info};
use std::io::{self, Write};

/// Run a parsed command against the archive client.
///
/// Results are printed to `out`. The shell reads its input from stdin.
pub async fn run<C, W>(
    command: Command,
    client: &C,
    log: &LogContext,
    out: &mut W,
) -> Result<(), Report>
where
    C: ArchiveClient,
    W: Write,
{
    debug!("Running command: {command:?} ({log})");

    match command {
        Command::Datasets(_) => datasets(client, out).await,
        Command::Revisions(args) => revisions(client, args.dataset.as_deref(), out).await,
        Command::Download(args) => download(client, &args).await,
        Command::Shell(_) => {
            let stdin = io::stdin();
            shell::interact(client, log, stdin.lock(), out).await
        }
    }
}

/// Print each dataset on its own line.
pub async fn datasets<C: ArchiveClient, W: Write>(client: &C, out: &mut W) -> Result<(), Report> {
    for dataset in client.datasets().await? {
        writeln!(out, "{dataset}")?;
    }
    Ok(())
}

/// Print each revision as 'dataset,revision'.
pub async fn revisions<C: ArchiveClient, W: Write>(
    client: &C,
    dataset: Option<&str>,
    out: &mut W,
) -> Result<(), Report> {
    for (dataset, revision) in client.revisions(dataset).await? {
        writeln!(out, "{dataset},{revision}")?;
    }
    Ok(())
}

/// Download into the target directory, creating it if needed.
pub async fn download<C: ArchiveClient>(
    client: &C,
    args: &cli::download::Args,
) -> Result<(), Report> {
    let files = client
        .download(&args.dataset, &args.revision, &args.target_directory, true)
        .await?;
    info!(
        "Retrieved {} files into {:?}",
        files.len(),
        args.target_directory
    );
    Ok(())
}
