use color_eyre::eyre::{Report, Result};
use djarchive::archive::Client;
use djarchive::config::Config;
use djarchive::{cli, dispatch, logging};
use log::debug;
use std::env;
use std::ffi::OsString;
use std::io;

#[tokio::main]
async fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let args: Vec<OsString> = env::args_os().collect();

    // Unknown commands show the usage and exit cleanly
    let command = match cli::parse(&args) {
        Ok(Some(command)) => command,
        Ok(None) => {
            print!("{}", cli::usage(&cli::program_name(&args)));
            return Ok(());
        }
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return Err(e.into()),
    };

    // Logging: environment, then config, then default
    let config = Config::load()?;
    let level = logging::resolve_level(
        env::var(logging::LOGLEVEL_ENV).ok(),
        config.loglevel.as_deref(),
    );
    let log = logging::init(&level, config.custom.logfile.as_deref())?;
    debug!("Logging: {log}");
    match &config.path {
        Some(path) => debug!("Read config: {path:?}"),
        None => debug!("No config file found, using defaults."),
    }

    let client = Client::from_config(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch::run(command, &client, &log, &mut out).await?;

    Ok(())
}
