use crate::utils;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Name of the index file at the archive root.
pub const INDEX_KEY: &str = "index.json";
/// Name of the manifest file in each revision directory.
pub const MANIFEST_NAME: &str = "manifest.json";

// ----------------------------------------------------------------------------
// Index

/// Datasets in the archive and their revisions.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Index {
    pub datasets: BTreeMap<String, Vec<String>>,
}

impl Index {
    pub fn from_slice(content: &[u8], location: &str) -> Result<Index, Report> {
        serde_json::from_slice(content)
            .wrap_err_with(|| format!("Failed to parse archive index: {location}"))
    }

    /// Dataset names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.datasets.keys().cloned().collect_vec()
    }

    /// Revisions of a dataset, in index order.
    pub fn revisions(&self, dataset: &str) -> Option<&[String]> {
        self.datasets.get(dataset).map(Vec::as_slice)
    }

    /// All dataset and revision pairs.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.datasets
            .iter()
            .flat_map(|(dataset, revisions)| {
                revisions
                    .iter()
                    .map(move |revision| (dataset.clone(), revision.clone()))
            })
            .collect_vec()
    }

    pub fn contains(&self, dataset: &str, revision: &str) -> bool {
        self.revisions(dataset)
            .map(|revisions| revisions.iter().any(|r| r == revision))
            .unwrap_or(false)
    }
}

/// Key of the manifest of a dataset revision.
pub fn manifest_key(dataset: &str, revision: &str) -> String {
    format!("{dataset}/{revision}/{MANIFEST_NAME}")
}

// ----------------------------------------------------------------------------
// Manifest

/// Files making up one dataset revision.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Manifest {
    pub files: Vec<ManifestEntry>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ManifestEntry {
    /// Path relative to the revision directory.
    pub path: String,
    pub sha256: String,
    pub size: u64,
}

impl Manifest {
    pub fn from_slice(content: &[u8], location: &str) -> Result<Manifest, Report> {
        let manifest: Manifest = serde_json::from_slice(content)
            .wrap_err_with(|| format!("Failed to parse manifest: {location}"))?;
        manifest
            .validate()
            .wrap_err_with(|| format!("Invalid manifest: {location}"))?;
        Ok(manifest)
    }

    /// Reject paths escaping the target directory and duplicate paths.
    pub fn validate(&self) -> Result<(), Report> {
        let mut seen = BTreeSet::new();
        for entry in &self.files {
            let path = utils::relative_path(&entry.path)?;
            if !seen.insert(path) {
                return Err(eyre!("Duplicate path in manifest: {:?}", entry.path));
            }
        }
        Ok(())
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|entry| entry.size).sum()
    }
}

impl ManifestEntry {
    /// Key of this file within a dataset revision.
    pub fn key(&self, dataset: &str, revision: &str) -> String {
        format!("{dataset}/{revision}/{}", self.path)
    }
}
