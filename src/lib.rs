pub mod archive;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod utils;
