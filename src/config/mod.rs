use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".bfscmprc.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Summary of the run under test
    #[serde(default = "default_current")]
    pub current: PathBuf,

    /// Summary last recorded on the reference branch
    #[serde(default = "default_baseline")]
    pub baseline: PathBuf,

    /// Suite label for the "No changes" annotation
    #[serde(default = "default_label")]
    pub label: String,

    /// Reference branch named in the summary annotation
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            current: default_current(),
            baseline: default_baseline(),
            label: default_label(),
            branch: default_branch(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from_dir(Path::new("."))
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

fn default_current() -> PathBuf {
    PathBuf::from("bfs-result.json")
}

fn default_baseline() -> PathBuf {
    PathBuf::from("latest-bfs-result.json")
}

fn default_label() -> String {
    "BFS".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}
