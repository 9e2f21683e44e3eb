use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::warn;

use crate::cli::{Cli, Command};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub attempts_path: PathBuf,
    pub user_id: Option<String>,
    pub command: Command,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let attempts_path = cli.attempts.unwrap_or_else(default_attempts_path);
        let user_id = cli.user.filter(|u| !u.trim().is_empty());

        Self {
            catalog_path: cli.catalog,
            attempts_path,
            user_id,
            command: cli.command,
        }
    }
}

pub fn default_attempts_path() -> PathBuf {
    match ProjectDirs::from("", "", "coursequiz") {
        Some(dirs) => dirs.data_dir().join("attempts.yaml"),
        None => {
            warn!("no home directory found, keeping attempts in the working directory");
            PathBuf::from("attempts.yaml")
        }
    }
}
