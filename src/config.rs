//! Runtime configuration: command-line values first, then environment
//! variables, then built-in defaults.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::cache::default_database_path;
use crate::error::{FantasyError, Result};
use crate::scoring::TraitTable;
use crate::{API_KEY_ENV_VAR, API_URL_ENV_VAR, DB_PATH_ENV_VAR, TRAITS_PATH_ENV_VAR};

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `--db`, then `HOOPS_FANTASY_DB`, then the cache directory.
pub fn resolve_database_path(cli_value: Option<PathBuf>) -> PathBuf {
    cli_value
        .or_else(|| env_value(DB_PATH_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(default_database_path)
}

/// `--traits`, then `HOOPS_FANTASY_TRAITS`, then the compiled-in table.
pub fn load_trait_table(cli_value: Option<&Path>) -> Result<TraitTable> {
    let path = cli_value
        .map(Path::to_path_buf)
        .or_else(|| env_value(TRAITS_PATH_ENV_VAR).map(PathBuf::from));

    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading trait table");
            TraitTable::load_json(&path)
        }
        None => Ok(TraitTable::builtin()),
    }
}

/// `--api-url`, then `HOOPS_FANTASY_API_URL`; required for remote commands.
pub fn resolve_api_url(cli_value: Option<String>) -> Result<String> {
    cli_value
        .or_else(|| env_value(API_URL_ENV_VAR))
        .ok_or_else(|| FantasyError::MissingConfig {
            what: "API URL".to_string(),
            env_var: API_URL_ENV_VAR.to_string(),
        })
}

/// `--api-key`, then `HOOPS_FANTASY_API_KEY`; public tables need none.
pub fn resolve_api_key(cli_value: Option<String>) -> Option<String> {
    cli_value.or_else(|| env_value(API_KEY_ENV_VAR))
}
