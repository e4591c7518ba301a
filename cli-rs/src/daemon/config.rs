/**
 * config.rs
 * Parser for daemon.yaml (YAML format)
 *
 * Lives in the configuration root (`$CLAUDE_CONFIG_DIR` or `~/.claude`).
 * Every key is optional:
 * ```yaml
 * label: com.hapi.cli.daemon
 * plistPath: /Library/LaunchDaemons/com.hapi.cli.daemon.plist
 * taskName: HAPI CLI Daemon
 * executable: /usr/local/bin/hapi
 * daemonArgs: []
 * ```
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{HapiError, Result};

/// File name of the daemon settings inside the configuration root
pub const DAEMON_CONFIG_FILE: &str = "daemon.yaml";

/// Default launchd label
pub const DEFAULT_LABEL: &str = "com.hapi.cli.daemon";

/// Default Windows scheduled task name
pub const DEFAULT_TASK_NAME: &str = "HAPI CLI Daemon";

/// Service identity used by the service manager collaborators
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DaemonConfig {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plist_path: Option<PathBuf>,
    pub task_name: String,
    /// Binary launched by the scheduled task (defaults to the running executable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,
    /// Arguments the Windows task passes to the executable; required there
    pub daemon_args: Vec<String>,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        DaemonConfig {
            label: DEFAULT_LABEL.to_string(),
            plist_path: None,
            task_name: DEFAULT_TASK_NAME.to_string(),
            executable: None,
            daemon_args: Vec::new(),
        }
    }
}

impl DaemonConfig {
    /// Load daemon settings from `path`
    ///
    /// A missing or empty file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no daemon config, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: DaemonConfig = serde_yaml::from_str(&content).map_err(|e| {
            HapiError::ParseError(format!("Invalid {}: {}", DAEMON_CONFIG_FILE, e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Load `daemon.yaml` from a configuration root directory
    pub fn load_from_root<P: AsRef<Path>>(config_root: P) -> Result<Self> {
        Self::load(config_root.as_ref().join(DAEMON_CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(HapiError::ValidationError(
                "label cannot be empty".to_string(),
            ));
        }

        if self.task_name.trim().is_empty() {
            return Err(HapiError::ValidationError(
                "taskName cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// launchd plist location, `/Library/LaunchDaemons/<label>.plist` unless set
    pub fn plist_path(&self) -> PathBuf {
        self.plist_path.clone().unwrap_or_else(|| {
            PathBuf::from("/Library/LaunchDaemons").join(format!("{}.plist", self.label))
        })
    }

    /// Daemon binary, falling back to the running executable
    pub fn executable(&self) -> Result<PathBuf> {
        match &self.executable {
            Some(path) => Ok(path.clone()),
            None => std::env::current_exe().map_err(|e| {
                HapiError::Environment(format!("Failed to locate current executable: {}", e))
            }),
        }
    }

    /// Write settings as YAML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
