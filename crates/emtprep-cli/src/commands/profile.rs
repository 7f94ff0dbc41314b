//! The `emtprep login` / `emtprep logout` commands.

use std::path::PathBuf;

use anyhow::Result;

use emtprep_core::profile::UserProfile;

pub fn login(username: String, profile_path: Option<PathBuf>) -> Result<()> {
    let path = super::profile_path(profile_path)?;
    let mut profile = UserProfile::load(&path);
    profile.set_username(&username)?;
    println!("Logged in as {username}.");
    Ok(())
}

pub fn logout(profile_path: Option<PathBuf>) -> Result<()> {
    let path = super::profile_path(profile_path)?;
    let mut profile = UserProfile::load(&path);
    if profile.username().is_none() {
        println!("No username set.");
        return Ok(());
    }
    profile.logout()?;
    println!("Logged out.");
    Ok(())
}
