use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use log::debug;
use std::path::PathBuf;
use url::Url;

// ----------------------------------------------------------------------------
// Store

/// Where archive content is read from.
///
/// Keys are '/' separated paths relative to the archive root.
#[derive(Clone, Debug)]
pub enum Store {
    Http(HttpStore),
    Local(LocalStore),
}

impl Store {
    /// Select a store from an endpoint.
    ///
    /// http(s) URLs are fetched over the network, file URLs and plain
    /// paths are read from disk.
    pub fn from_endpoint(endpoint: &str) -> Result<Store, Report> {
        let store = match Url::parse(endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                Store::Http(HttpStore::new(url)?)
            }
            Ok(url) if url.scheme() == "file" => {
                let root = url
                    .to_file_path()
                    .map_err(|_| eyre!("Invalid file endpoint: {endpoint}"))?;
                Store::Local(LocalStore::new(root))
            }
            // single letter schemes are windows drive letters
            Ok(url) if url.scheme().len() == 1 => Store::Local(LocalStore::new(endpoint.into())),
            Ok(url) => {
                return Err(eyre!("Unsupported endpoint scheme {:?}: {endpoint}", url.scheme())
                    .suggestion("Use an http(s) URL, a file URL or a directory path."))
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Store::Local(LocalStore::new(endpoint.into()))
            }
            Err(e) => return Err(e).wrap_err_with(|| format!("Invalid endpoint: {endpoint}")),
        };

        Ok(store)
    }

    /// URL or path of a key, for messages and download records.
    pub fn location(&self, key: &str) -> String {
        match self {
            Store::Http(store) => store
                .url(key)
                .map(|url| url.to_string())
                .unwrap_or_else(|_| format!("{}{key}", store.base)),
            Store::Local(store) => store.path(key).display().to_string(),
        }
    }

    pub async fn fetch(&self, key: &str) -> Result<Vec<u8>, Report> {
        debug!("Fetching: {}", self.location(key));
        match self {
            Store::Http(store) => store.fetch(key).await,
            Store::Local(store) => store.fetch(key),
        }
    }
}

// ----------------------------------------------------------------------------
// HTTP Store

#[derive(Clone, Debug)]
pub struct HttpStore {
    pub base: Url,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(mut base: Url) -> Result<Self, Report> {
        // keys are joined below the last path segment
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let user_agent = format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .wrap_err("Failed to create HTTP client.")?;

        Ok(HttpStore { base, client })
    }

    pub fn url(&self, key: &str) -> Result<Url, Report> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| eyre!("Endpoint cannot be used as a base URL: {}", self.base))?
            .pop_if_empty()
            .extend(key.split('/'));
        Ok(url)
    }

    pub async fn fetch(&self, key: &str) -> Result<Vec<u8>, Report> {
        let url = self.url(key)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .wrap_err_with(|| format!("Unable to download file: {url}"))?;
        if !response.status().is_success() {
            return Err(eyre!(
                "Unable to download file: {url}\nStatus code {}.",
                response.status()
            ));
        }

        let content = response
            .bytes()
            .await
            .wrap_err_with(|| format!("Unable to read response: {url}"))?;
        Ok(content.to_vec())
    }
}

// ----------------------------------------------------------------------------
// Local Store

#[derive(Clone, Debug)]
pub struct LocalStore {
    pub root: PathBuf,
}

impl LocalStore {
    pub fn new(root: PathBuf) -> Self {
        LocalStore { root }
    }

    pub fn path(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.root.clone(), |path, part| path.join(part))
    }

    pub fn fetch(&self, key: &str) -> Result<Vec<u8>, Report> {
        let path = self.path(key);
        std::fs::read(&path).wrap_err_with(|| format!("Unable to read file: {path:?}"))
    }
}
