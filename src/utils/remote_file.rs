use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// A file retrieved from the archive.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RemoteFile {
    pub url: String,
    pub sha256: String,
    pub size: u64,
    pub local_path: PathBuf,
    pub date_downloaded: DateTime<Utc>,
}

impl Default for RemoteFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteFile {
    pub fn new() -> Self {
        RemoteFile {
            url: String::new(),
            sha256: String::new(),
            size: 0,
            local_path: PathBuf::new(),
            date_downloaded: DateTime::default(),
        }
    }
}
