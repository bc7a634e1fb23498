use crate::archive::manifest::{manifest_key, Index, Manifest};
use crate::archive::store::Store;
use crate::{utils, utils::remote_file::RemoteFile};
use chrono::prelude::*;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use indicatif::{style::ProgressStyle, ProgressBar};
use itertools::Itertools;
use log::{debug, info, warn};
use std::fs::create_dir_all;
use std::path::Path;

/// Download a dataset revision into the top level of a target directory.
pub async fn revision(
    store: &Store,
    index: &Index,
    dataset: &str,
    revision: &str,
    target_directory: &Path,
    create_target: bool,
) -> Result<Vec<RemoteFile>, Report> {
    info!("Downloading dataset: {dataset} {revision}");

    // --------------------------------------------------------------------
    // Lookup

    let Some(revisions) = index.revisions(dataset) else {
        return Err(eyre!("Unknown dataset: {dataset}")
            .suggestion(format!("Available datasets: {}", index.names().join(", "))));
    };
    if !index.contains(dataset, revision) {
        return Err(eyre!("Unknown revision of {dataset}: {revision}")
            .suggestion(format!("Available revisions: {}", revisions.iter().join(", "))));
    }
    // names from the index become path segments of keys
    utils::relative_path(dataset)?;
    utils::relative_path(revision)?;

    // --------------------------------------------------------------------
    // Target Directory

    if target_directory.exists() {
        if !target_directory.is_dir() {
            return Err(eyre!("Target is not a directory: {target_directory:?}"));
        }
    } else if create_target {
        info!("Creating target directory: {target_directory:?}");
        create_dir_all(target_directory)
            .wrap_err_with(|| format!("Failed to create directory: {target_directory:?}"))?;
    } else {
        return Err(eyre!("Target directory does not exist: {target_directory:?}"));
    }

    // --------------------------------------------------------------------
    // Manifest

    let key = manifest_key(dataset, revision);
    let location = store.location(&key);
    let manifest = Manifest::from_slice(&store.fetch(&key).await?, &location)?;
    info!(
        "Retrieving {} files ({} bytes).",
        manifest.files.len(),
        manifest.total_size()
    );

    // --------------------------------------------------------------------
    // Files

    let progress_bar_style = ProgressStyle::with_template(
        "{bar:40} {pos}/{len} ({percent}%) | Files | Elapsed: {elapsed_precise}",
    )
    .wrap_err("Failed to create progress bar from template.")?;
    let progress_bar = ProgressBar::new(manifest.files.len() as u64);
    progress_bar.set_style(progress_bar_style);

    let mut remote_files = Vec::new();

    for entry in &manifest.files {
        let key = entry.key(dataset, revision);
        let url = store.location(&key);
        let content = store.fetch(&key).await?;

        if content.len() as u64 != entry.size {
            return Err(eyre!(
                "Size mismatch for {url}: expected {} bytes, received {}.",
                entry.size,
                content.len()
            ));
        }
        let sha256 = utils::sha256_digest(&content);
        if !sha256.eq_ignore_ascii_case(&entry.sha256) {
            return Err(eyre!(
                "Checksum mismatch for {url}: expected {}, received {sha256}.",
                entry.sha256
            ));
        }

        let local_path = target_directory.join(utils::relative_path(&entry.path)?);
        if local_path.exists() {
            warn!("Overwriting existing file: {local_path:?}");
        }
        utils::write_file(&local_path, &content)?;

        let remote_file = RemoteFile {
            url,
            sha256,
            size: entry.size,
            local_path,
            date_downloaded: Utc::now(),
        };
        debug!("Downloaded file: {remote_file:?}");
        remote_files.push(remote_file);

        progress_bar.inc(1);
    }
    progress_bar.finish();

    info!("Done.");
    Ok(remote_files)
}
