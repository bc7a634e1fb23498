use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Names a config file to use instead of the default search.
pub const CONFIG_ENV: &str = "DJARCHIVE_CONFIG";
/// Overrides the archive endpoint from the config file.
pub const ENDPOINT_ENV: &str = "DJARCHIVE_ENDPOINT";
/// Config file looked up in the working directory.
pub const LOCAL_CONFIG: &str = "dj_local_conf.json";
/// Config file looked up in the home directory.
pub const GLOBAL_CONFIG: &str = ".datajoint_config.json";
pub const DEFAULT_ENDPOINT: &str = "https://djarchive.datajoint.io/djarchive";

// ----------------------------------------------------------------------------
// Config

/// Settings read from a DataJoint style JSON config file.
///
/// Unknown keys are ignored, so a full DataJoint config can be shared.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Config {
    #[serde(default)]
    pub loglevel: Option<String>,

    #[serde(default)]
    pub custom: Custom,

    #[serde(default, rename = "djarchive.client.endpoint")]
    pub endpoint: Option<String>,

    /// File the config was read from, if any.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Custom {
    #[serde(default)]
    pub logfile: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    /// Load the config from the process environment.
    ///
    /// Searches the usual locations, then applies the endpoint override.
    pub fn load() -> Result<Config, Report> {
        let explicit = env::var_os(CONFIG_ENV).map(PathBuf::from);
        let cwd = env::current_dir().wrap_err("Failed to get the working directory.")?;
        let path = Config::find(explicit, &cwd, dirs::home_dir())?;

        let mut config = match path {
            Some(path) => Config::read(&path)?,
            None => Config::new(),
        };

        if let Ok(endpoint) = env::var(ENDPOINT_ENV) {
            config.endpoint = Some(endpoint);
        }

        Ok(config)
    }

    /// Locate the config file.
    ///
    /// An explicitly requested file must exist. Otherwise the working
    /// directory is checked before the home directory, and `None` means
    /// no config file was found.
    pub fn find(
        explicit: Option<PathBuf>,
        cwd: &Path,
        home: Option<PathBuf>,
    ) -> Result<Option<PathBuf>, Report> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(eyre!("Config file does not exist: {path:?}")
                    .suggestion(format!("Check the {CONFIG_ENV} environment variable.")));
            }
            return Ok(Some(path));
        }

        let local = cwd.join(LOCAL_CONFIG);
        if local.is_file() {
            return Ok(Some(local));
        }

        let global = home.map(|home| home.join(GLOBAL_CONFIG));
        Ok(global.filter(|path| path.is_file()))
    }

    /// Read config from file.
    pub fn read(path: &Path) -> Result<Config, Report> {
        let config = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read file: {path:?}."))?;
        let mut config: Config = serde_json::from_str(&config)
            .wrap_err_with(|| format!("Failed to parse file: {path:?}"))?;
        config.path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Archive endpoint, falling back to the public archive.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }
}
