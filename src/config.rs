use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, trace};

use crate::storage::DEFAULT_FILE;

const FILE_ENV: &str = "TASK_TRACKER_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub file: PathBuf,
    pub color: bool,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub file: Option<PathBuf>,
    pub no_color: bool,
    pub is_terminal: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    file: Option<PathBuf>,
    color: Option<bool>,
}

impl AppConfig {
    pub fn load(overrides: Overrides) -> Result<Self> {
        let file_cfg = match config_file_path() {
            Some(path) => read_file_config(&path)?,
            None => {
                debug!("No config directory found, using defaults");
                FileConfig::default()
            }
        };
        Ok(Self::resolve(
            overrides,
            file_cfg,
            env_value(FILE_ENV),
            env_value("NO_COLOR").is_some(),
        ))
    }

    fn resolve(
        overrides: Overrides,
        file_cfg: FileConfig,
        env_file: Option<String>,
        no_color_env: bool,
    ) -> Self {
        let file = overrides
            .file
            .or_else(|| env_file.map(PathBuf::from))
            .or(file_cfg.file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));
        info!("Task file: {}", file.display());

        let color = overrides.is_terminal
            && !overrides.no_color
            && !no_color_env
            && file_cfg.color.unwrap_or(true);
        debug!("Color output: {}", color);

        Self { file, color }
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        debug!(
            "Config file does not exist: {}, using defaults",
            path.display()
        );
        return Ok(FileConfig::default());
    }

    info!("Reading config file: {}", path.display());
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;

    trace!("Parsing TOML config");
    toml::from_str(&data).with_context(|| format!("invalid TOML in {}", path.display()))
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("task-tracker").join("config.toml"))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
