use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Tier;

/// Startup preferences persisted between runs. Deliberately small: the last
/// chosen difficulty tier is the only thing worth remembering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub difficulty: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: "easy".to_string(),
        }
    }
}

impl Config {
    pub fn from_tier(tier: Tier) -> Self {
        Self {
            difficulty: tier.to_string().to_lowercase(),
        }
    }

    /// The stored tier, if the file holds a recognizable name.
    pub fn tier(&self) -> Option<Tier> {
        Tier::from_name(&self.difficulty)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "sprint") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("sprint_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
