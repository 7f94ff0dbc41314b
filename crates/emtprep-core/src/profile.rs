//! Local user profile.
//!
//! The username shown on the leaderboard lives in a small TOML file at an
//! explicit path injected by the caller; there is no ambient global.
//! Loaded once at startup. `logout` clears the slot and rewrites the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfileData {
    #[serde(default)]
    username: Option<String>,
}

/// The persisted user profile.
#[derive(Debug)]
pub struct UserProfile {
    path: PathBuf,
    data: ProfileData,
}

impl UserProfile {
    /// Load the profile from `path`. A missing file is an empty profile;
    /// an unreadable one is logged and treated the same.
    pub fn load(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!("ignoring corrupt profile {}: {e}", path.display());
                    ProfileData::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ProfileData::default(),
            Err(e) => {
                tracing::warn!("failed to read profile {}: {e}", path.display());
                ProfileData::default()
            }
        };
        Self {
            path: path.to_path_buf(),
            data,
        }
    }

    /// The default profile location: `~/.config/emtprep/profile.toml`.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("emtprep")
                .join("profile.toml")
        })
    }

    pub fn username(&self) -> Option<&str> {
        self.data.username.as_deref()
    }

    /// Set the username and persist it.
    pub fn set_username(&mut self, username: &str) -> Result<()> {
        self.data.username = Some(username.to_string());
        self.save()
    }

    /// Clear the username and persist the empty profile.
    pub fn logout(&mut self) -> Result<()> {
        self.data.username = None;
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(&self.data).context("failed to serialize profile")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write profile {}", self.path.display()))?;
        Ok(())
    }
}
