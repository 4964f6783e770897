use std::env;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use wordnote_config::Config;

pub const MAIN_PROFILE: &str = "main";

/// Load the default config shipped in the repo
fn load_repo_default_config() -> anyhow::Result<Config> {
    let path = Path::new("config.json");
    if !path.exists() {
        tracing::info!("No repo config.json, using built-in defaults");
        return Ok(Config::default());
    }

    tracing::info!("Loading repo default config...");
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader).context("parsing config.json")?;
    Ok(config)
}

/// `$WORDNOTE_HOME`, else `~/.wordnote`
pub fn wordnote_root() -> PathBuf {
    if let Ok(home) = env::var("WORDNOTE_HOME") {
        return PathBuf::from(home);
    }

    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".wordnote")
}

fn profiles_dir(root: &Path) -> PathBuf {
    root.join("profiles")
}

fn profile_file(root: &Path, name: &str) -> PathBuf {
    profiles_dir(root).join(format!("{name}.json"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(profile.value)
}

/// Initialize user config folders and main profile if missing
pub fn init_user_config(root: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(profiles_dir(root))
        .with_context(|| format!("creating {}", profiles_dir(root).display()))?;

    let main_profile = profile_file(root, MAIN_PROFILE);

    if !main_profile.exists() {
        // Use repo default as the initial main profile
        let default_config = load_repo_default_config()?;
        save_user_profile(root, MAIN_PROFILE, &default_config)?;
        tracing::info!("Created main profile in {}", root.display());
    }

    Ok(())
}

/// Load a user profile by name, defaulting to main if name not found
pub fn load_user_profile(root: &Path, name: &str) -> anyhow::Result<Config> {
    let file = profile_file(root, name);

    if file.exists() {
        read_profile(&file)
    } else {
        tracing::warn!("Profile {name} not found, falling back to main profile or repo default");
        let main_file = profile_file(root, MAIN_PROFILE);
        if main_file.exists() {
            read_profile(&main_file)
        } else {
            // First-run fallback to repo default
            load_repo_default_config()
        }
    }
}

/// Write `config` as profile `name`, replacing any previous file
pub fn save_user_profile(root: &Path, name: &str, config: &Config) -> anyhow::Result<PathBuf> {
    let profile = Profile {
        name: name.into(),
        value: config.clone(),
    };
    let file = profile_file(root, name);
    fs::create_dir_all(profiles_dir(root))?;
    fs::write(&file, serde_json::to_string_pretty(&profile)?)
        .with_context(|| format!("writing {}", file.display()))?;
    tracing::debug!("Saved profile {name}");
    Ok(file)
}
