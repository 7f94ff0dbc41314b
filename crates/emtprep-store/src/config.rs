//! Store configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Connection settings for the hosted backend.
///
/// Note: Custom Debug impl masks the API key to prevent accidental
/// exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API endpoint, including the version prefix.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Project identifier sent with every request.
    #[serde(default = "default_project_id")]
    pub project_id: String,
    /// Server API key; anonymous access when absent.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Database holding the app's collections.
    #[serde(default = "default_database_id")]
    pub database_id: String,
    /// Scenario collection.
    #[serde(default = "default_scenarios_collection")]
    pub scenarios_collection: String,
    /// Question collection.
    #[serde(default = "default_questions_collection")]
    pub questions_collection: String,
    /// High-score collection.
    #[serde(default = "default_scores_collection")]
    pub scores_collection: String,
    /// Storage bucket holding guideline PDFs.
    #[serde(default = "default_bucket_id")]
    pub bucket_id: String,
}

fn default_endpoint() -> String {
    "https://cloud.appwrite.io/v1".to_string()
}
fn default_project_id() -> String {
    "67bc6c700000d69de38b".to_string()
}
fn default_database_id() -> String {
    "67bc7a3300045b341a68".to_string()
}
fn default_scenarios_collection() -> String {
    "67defbef001da3c2962a".to_string()
}
fn default_questions_collection() -> String {
    "67bc7a60002cea5f0f06".to_string()
}
fn default_scores_collection() -> String {
    "67c9cd07000cbea7e5d1".to_string()
}
fn default_bucket_id() -> String {
    "67bc767d001e3dc0f566".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            project_id: default_project_id(),
            api_key: None,
            database_id: default_database_id(),
            scenarios_collection: default_scenarios_collection(),
            questions_collection: default_questions_collection(),
            scores_collection: default_scores_collection(),
            bucket_id: default_bucket_id(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("database_id", &self.database_id)
            .field("scenarios_collection", &self.scenarios_collection)
            .field("questions_collection", &self.questions_collection)
            .field("scores_collection", &self.scores_collection)
            .field("bucket_id", &self.bucket_id)
            .finish()
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `emtprep.toml` in the current directory
/// 2. `~/.config/emtprep/config.toml`
///
/// Environment variable override: `EMTPREP_API_KEY`.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("emtprep.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AppConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AppConfig::default(),
    };

    if let Ok(key) = std::env::var("EMTPREP_API_KEY") {
        config.api_key = Some(key);
    }

    config.endpoint = resolve_env_vars(&config.endpoint);
    config.project_id = resolve_env_vars(&config.project_id);
    config.api_key = config.api_key.as_ref().map(|k| resolve_env_vars(k));

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("emtprep"))
}
