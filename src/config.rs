use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::sheet_url::resolve_spreadsheet_id;
use crate::source::retry::DEFAULT_MAX_RETRIES;

pub const ENV_CREDS_PATH: &str = "CREDS_PATH";
pub const ENV_SPREADSHEET_ID: &str = "SPREADSHEET_ID";
pub const ENV_WORKSHEET: &str = "ADSDASH_WORKSHEET";
pub const ENV_MAX_RETRIES: &str = "ADSDASH_MAX_RETRIES";
pub const ENV_TIMEOUT_SECS: &str = "ADSDASH_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Startup settings for reaching the spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Path to the service-account key file.
    pub credentials_path: PathBuf,
    /// Resolved spreadsheet key (never a URL).
    pub spreadsheet_id: String,
    /// Worksheet title; `None` reads the first sheet.
    pub worksheet: Option<String>,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl Settings {
    /// Load settings with precedence: `overrides` > process environment >
    /// env file. With no explicit `env_file`, `./.env` and `~/.adsdash/env`
    /// are loaded into the process environment without replacing set vars.
    pub fn load(overrides: &HashMap<String, String>, env_file: Option<&Path>) -> Result<Self> {
        let file_vars = match env_file {
            Some(path) => read_env_file(path)?,
            None => {
                load_default_env_files();
                HashMap::new()
            }
        };

        Self::from_lookup(|key| {
            overrides
                .get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
                .or_else(|| file_vars.get(key).cloned())
        })
    }

    /// Build settings from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credentials_path = get(ENV_CREDS_PATH)
            .map(PathBuf::from)
            .ok_or_else(|| Error::Config(format!("{ENV_CREDS_PATH} is not set")))?;

        let spreadsheet = get(ENV_SPREADSHEET_ID)
            .ok_or_else(|| Error::Config(format!("{ENV_SPREADSHEET_ID} is not set")))?;
        let spreadsheet_id = resolve_spreadsheet_id(&spreadsheet)?;

        let max_retries = match get(ENV_MAX_RETRIES) {
            Some(v) => parse_number(ENV_MAX_RETRIES, &v)?,
            None => DEFAULT_MAX_RETRIES,
        };
        let timeout_secs = match get(ENV_TIMEOUT_SECS) {
            Some(v) => parse_number(ENV_TIMEOUT_SECS, &v)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            credentials_path,
            spreadsheet_id,
            worksheet: get(ENV_WORKSHEET),
            max_retries,
            timeout_secs,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} must be a non-negative integer, got '{value}'")))
}

/// Read an env file into a map without touching the process environment.
fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
    iter.map(|item| item.map_err(|e| Error::Config(format!("{}: {e}", path.display()))))
        .collect()
}

fn load_default_env_files() {
    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("Loaded environment from {}", path.display());
    }
    if let Some(home) = dirs::home_dir() {
        let path = home.join(".adsdash").join("env");
        if path.is_file() {
            match dotenvy::from_path(&path) {
                Ok(()) => log::debug!("Loaded environment from {}", path.display()),
                Err(e) => log::warn!("Ignoring {}: {e}", path.display()),
            }
        }
    }
}
