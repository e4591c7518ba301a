/**
 * root.rs
 * Configuration root resolution
 *
 * The configuration root is where per-project storage lives:
 * - `$CLAUDE_CONFIG_DIR` when set to a non-empty value (used verbatim)
 * - `~/.claude` otherwise
 *
 * Process-global inputs (current directory, home directory, override) are
 * captured once in a `PathEnvironment` so that path derivation stays pure.
 * The current and home directories are optional: a missing one is only an
 * error for the derivation that actually needs it.
 */

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::errors::{HapiError, Result};

/// Environment variable overriding the configuration root
pub const CONFIG_DIR_ENV: &str = "CLAUDE_CONFIG_DIR";

/// Default configuration directory name under the home directory
pub const DEFAULT_CONFIG_DIR_NAME: &str = ".claude";

/// Snapshot of the process state that path derivation depends on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathEnvironment {
    pub current_dir: Option<PathBuf>,
    pub home_dir: Option<PathBuf>,
    pub config_dir_override: Option<OsString>,
}

impl PathEnvironment {
    pub fn new<C, H>(current_dir: C, home_dir: H) -> Self
    where
        C: Into<PathBuf>,
        H: Into<PathBuf>,
    {
        PathEnvironment {
            current_dir: Some(current_dir.into()),
            home_dir: Some(home_dir.into()),
            config_dir_override: None,
        }
    }

    /// Set the configuration directory override (builder style)
    pub fn with_config_dir<S: Into<OsString>>(mut self, config_dir: S) -> Self {
        self.config_dir_override = Some(config_dir.into());
        self
    }

    /// Capture the current directory, home directory and `CLAUDE_CONFIG_DIR`
    /// of the running process.
    ///
    /// Never fails: a directory that cannot be determined is left unset and
    /// only reported when a derivation needs it. Nothing is cached across
    /// calls.
    pub fn from_process() -> Self {
        PathEnvironment {
            current_dir: env::current_dir().ok(),
            home_dir: dirs::home_dir(),
            config_dir_override: env::var_os(CONFIG_DIR_ENV),
        }
    }

    /// Base for relative paths
    pub fn current_dir(&self) -> Result<&Path> {
        self.current_dir.as_deref().ok_or_else(|| {
            HapiError::Environment("Could not determine current directory".to_string())
        })
    }

    /// Home directory for the default configuration root
    pub fn home_dir(&self) -> Result<&Path> {
        self.home_dir.as_deref().ok_or_else(|| {
            HapiError::Environment("Could not determine home directory".to_string())
        })
    }
}

/// Resolved configuration root and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigRoot {
    /// Taken verbatim from `CLAUDE_CONFIG_DIR`
    Override(PathBuf),
    /// `<home>/.claude`
    Default(PathBuf),
}

impl ConfigRoot {
    /// Pick the override when it is non-empty, else the home default.
    ///
    /// The home directory is only consulted when there is no override.
    pub fn resolve(environment: &PathEnvironment) -> Result<Self> {
        match environment.config_dir_override.as_ref() {
            Some(dir) if !dir.is_empty() => Ok(ConfigRoot::Override(PathBuf::from(dir))),
            _ => Ok(ConfigRoot::Default(
                environment.home_dir()?.join(DEFAULT_CONFIG_DIR_NAME),
            )),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ConfigRoot::Override(path) | ConfigRoot::Default(path) => path,
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, ConfigRoot::Override(_))
    }

    pub fn into_path_buf(self) -> PathBuf {
        match self {
            ConfigRoot::Override(path) | ConfigRoot::Default(path) => path,
        }
    }
}

/// Configuration root for the running process
pub fn claude_config_dir() -> Result<PathBuf> {
    let environment = PathEnvironment::from_process();
    Ok(ConfigRoot::resolve(&environment)?.into_path_buf())
}
