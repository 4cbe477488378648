//! Launcher defaults stored in `config/launcher.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Location of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = "config/launcher.toml";

/// Defaults applied when neither an argument nor an environment variable
/// supplies a value. Missing fields take the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Port used when neither `-p` nor `PORT` is set.
    pub port: u16,

    /// Environment name used when neither `-e` nor an env variable is set.
    pub environment: String,

    /// Rackup file passed to the server.
    pub rackup: String,

    /// Pid file written by the server.
    pub pid_file: String,

    /// Command prefix used to build `restart_cmd`.
    pub restart_executable: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: "development".to_string(),
            rackup: "config.ru".to_string(),
            pid_file: "tmp/pids/server.pid".to_string(),
            restart_executable: "bin/rails server".to_string(),
        }
    }
}

impl LauncherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("port must be > 0"));
        }
        if self.environment.trim().is_empty() {
            return Err(anyhow!("environment must be non-empty"));
        }
        if self.rackup.trim().is_empty() {
            return Err(anyhow!("rackup must be non-empty"));
        }
        if self.pid_file.trim().is_empty() {
            return Err(anyhow!("pid_file must be non-empty"));
        }
        if self.restart_executable.trim().is_empty() {
            return Err(anyhow!("restart_executable must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LauncherConfig::default()`.
pub fn load_config(path: &Path) -> Result<LauncherConfig> {
    if !path.exists() {
        let cfg = LauncherConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LauncherConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
