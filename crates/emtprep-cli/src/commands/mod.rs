//! CLI subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::Result;

use emtprep_core::profile::UserProfile;
use emtprep_store::{load_config_from, AppConfig, AppwriteStore};

pub mod guidelines;
pub mod init;
pub mod profile;
pub mod quiz;
pub mod run;
pub mod scenarios;
pub mod scores;
pub mod seed;
pub mod validate;

/// Load config and open the hosted store.
fn open_store(config_path: Option<&Path>) -> Result<(AppConfig, AppwriteStore)> {
    let config = load_config_from(config_path)?;
    let store = AppwriteStore::new(config.clone());
    Ok((config, store))
}

/// Resolve the profile path: explicit flag, or the default location.
fn profile_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    flag.or_else(UserProfile::default_path)
        .ok_or_else(|| anyhow::anyhow!("cannot determine profile path; pass --profile"))
}
