pub mod download;
pub mod manifest;
pub mod store;

use crate::config::Config;
use crate::utils::remote_file::RemoteFile;
use color_eyre::eyre::{eyre, Report, Result};
use color_eyre::Help;
use log::debug;
use manifest::{Index, INDEX_KEY};
use std::path::Path;
use store::Store;

// ----------------------------------------------------------------------------
// Archive Client

/// Operations the command dispatcher needs from an archive.
#[allow(async_fn_in_trait)]
pub trait ArchiveClient {
    /// Names of the available datasets.
    async fn datasets(&self) -> Result<Vec<String>, Report>;

    /// Dataset and revision pairs, for one dataset or for all of them.
    async fn revisions(&self, dataset: Option<&str>) -> Result<Vec<(String, String)>, Report>;

    /// Retrieve a dataset revision into the top level of a target directory.
    ///
    /// A missing target directory is created when `create_target` is set,
    /// and is an error otherwise.
    async fn download(
        &self,
        dataset: &str,
        revision: &str,
        target_directory: &Path,
        create_target: bool,
    ) -> Result<Vec<RemoteFile>, Report>;
}

/// Client for an archive laid out as:
///
/// ```text
/// <root>/index.json
/// <root>/<dataset>/<revision>/manifest.json
/// <root>/<dataset>/<revision>/<path>
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    store: Store,
}

impl Client {
    pub fn new(store: Store) -> Self {
        Client { store }
    }

    pub fn from_config(config: &Config) -> Result<Client, Report> {
        let endpoint = config.endpoint();
        debug!("Archive endpoint: {endpoint}");
        Ok(Client::new(Store::from_endpoint(endpoint)?))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub async fn index(&self) -> Result<Index, Report> {
        let content = self.store.fetch(INDEX_KEY).await?;
        Index::from_slice(&content, &self.store.location(INDEX_KEY))
    }
}

impl ArchiveClient for Client {
    async fn datasets(&self) -> Result<Vec<String>, Report> {
        Ok(self.index().await?.names())
    }

    async fn revisions(&self, dataset: Option<&str>) -> Result<Vec<(String, String)>, Report> {
        let index = self.index().await?;

        let Some(dataset) = dataset else {
            return Ok(index.pairs());
        };
        let revisions = index.revisions(dataset).ok_or_else(|| {
            eyre!("Unknown dataset: {dataset}")
                .suggestion(format!("Available datasets: {}", index.names().join(", ")))
        })?;

        Ok(revisions
            .iter()
            .map(|revision| (dataset.to_string(), revision.clone()))
            .collect())
    }

    async fn download(
        &self,
        dataset: &str,
        revision: &str,
        target_directory: &Path,
        create_target: bool,
    ) -> Result<Vec<RemoteFile>, Report> {
        let index = self.index().await?;
        download::revision(
            &self.store,
            &index,
            dataset,
            revision,
            target_directory,
            create_target,
        )
        .await
    }
}
