use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use qamus_config::Config;
use serde::{Deserialize, Serialize};

/// Config folder, `QAMUS_CONFIG_DIR` or `~/.config/qamus`
fn qamus_root() -> Option<PathBuf> {
    if let Ok(dir) = env::var("QAMUS_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("qamus"))
}

pub fn profiles_dir() -> Option<PathBuf> {
    qamus_root().map(|root| root.join("profiles"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Load a bare config file. Environment variables still override it.
pub fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let mut config: Config = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.apply_env();
    Ok(config)
}

/// Load profile `name` from `dir`, falling back to main and then to environment defaults
pub fn load_profile_from(dir: &Path, name: &str) -> anyhow::Result<Config> {
    for candidate in [name, "main"] {
        let file = dir.join(format!("{candidate}.json"));
        if file.exists() {
            let data = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read profile {}", file.display()))?;
            let profile: Profile = serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse profile {}", file.display()))?;
            if candidate != name {
                tracing::warn!("Profile {name} not found, using main profile");
            }
            let mut config = profile.value;
            config.apply_env();
            return Ok(config);
        }
    }

    tracing::debug!("No profile found, using environment defaults");
    Ok(Config::new())
}

/// Write `config` as profile `name` into `dir`
pub fn save_profile_to(dir: &Path, name: &str, config: &Config) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let profile = Profile {
        name: name.into(),
        value: config.clone(),
    };
    let file = dir.join(format!("{name}.json"));
    fs::write(&file, serde_json::to_string_pretty(&profile)?)
        .with_context(|| format!("Failed to write profile {}", file.display()))?;
    tracing::info!("Saved profile: {name}");
    Ok(file)
}

/// Load a user profile by name from the config folder
pub fn load_user_profile(name: &str) -> anyhow::Result<Config> {
    match profiles_dir() {
        Some(dir) => load_profile_from(&dir, name),
        None => {
            tracing::debug!("No config folder, using environment defaults");
            Ok(Config::new())
        }
    }
}

/// Save `config` as a named profile in the config folder
pub fn save_profile(name: &str, config: &Config) -> anyhow::Result<PathBuf> {
    let dir = profiles_dir().context("No config folder available")?;
    save_profile_to(&dir, name, config)
}

/// Resolve the config for this run: explicit file, then named profile
pub fn load_config(path: Option<&Path>, profile: Option<&str>) -> anyhow::Result<Config> {
    match path {
        Some(path) => load_config_file(path),
        None => load_user_profile(profile.unwrap_or("main")),
    }
}
