use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use itf_config::Config;
use serde::{Deserialize, Serialize};

/// Represents a settings profile on disk
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Profiles stored as `<root>/profiles/<name>.json`
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `ITF_CONFIG_DIR`, else the platform config dir
    pub fn from_env() -> anyhow::Result<Self> {
        let root = match env::var_os("ITF_CONFIG_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .context("No config directory on this platform; set ITF_CONFIG_DIR")?
                .join("itf"),
        };
        Ok(Self::new(root))
    }

    fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(format!("{name}.json"))
    }

    /// Create the profiles folder and a default main profile if missing
    pub fn init_main_profile(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.profiles_dir())?;

        let main_profile = self.profile_path("main");
        if !main_profile.exists() {
            let profile = Profile {
                name: "main".into(),
                value: Config::default(),
            };
            fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
            tracing::info!("Created main profile at {}", main_profile.display());
        }

        Ok(())
    }

    /// Load a profile by name, falling back to main, then to defaults.
    /// Environment overrides are applied last.
    pub fn load_profile(&self, name: &str) -> anyhow::Result<Config> {
        let profile_file = self.profile_path(name);
        let main_file = self.profile_path("main");

        let mut config = if profile_file.exists() {
            read_profile(&profile_file)?
        } else if main_file.exists() {
            tracing::warn!("Profile {name} not found, falling back to main profile");
            read_profile(&main_file)?
        } else {
            tracing::warn!("No profiles found, using defaults");
            return Ok(Config::new());
        };

        config.apply_env();
        Ok(config)
    }
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    Ok(profile.value)
}
