//! Service manager collaborators
//!
//! Thin `DaemonInstaller`s that run one OS service-manager command per
//! operation:
//! - macOS:   `launchctl bootstrap system <plist>` / `launchctl bootout system/<label>`
//! - Windows: `schtasks /Create ...` / `schtasks /Delete ...`
//!
//! The launchd plist is expected to exist already.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::daemon::config::DaemonConfig;
use crate::daemon::installer::DaemonInstaller;
use crate::errors::{HapiError, Result};
use crate::project::claude_config_dir;

/// A program plus arguments, run to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ServiceCommand {
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ServiceCommand {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `launchctl bootstrap system <plist>`
    pub fn launchd_bootstrap(config: &DaemonConfig) -> Self {
        Self::new(
            "launchctl",
            [
                "bootstrap".to_string(),
                "system".to_string(),
                config.plist_path().to_string_lossy().into_owned(),
            ],
        )
    }

    /// `launchctl bootout system/<label>`
    pub fn launchd_bootout(config: &DaemonConfig) -> Self {
        Self::new(
            "launchctl",
            ["bootout".to_string(), format!("system/{}", config.label)],
        )
    }

    /// `schtasks /Create` for a task started at logon
    ///
    /// Refuses an empty `daemonArgs`: the task would start the CLI without
    /// a command and exit immediately.
    pub fn schtasks_create(config: &DaemonConfig, executable: &Path) -> Result<Self> {
        if config.daemon_args.is_empty() {
            return Err(HapiError::ValidationError(
                "daemonArgs must be set in daemon.yaml to create the scheduled task".to_string(),
            ));
        }

        let mut task_run = format!("\"{}\"", executable.display());
        for arg in &config.daemon_args {
            task_run.push(' ');
            task_run.push_str(arg);
        }

        Ok(Self::new(
            "schtasks",
            [
                "/Create".to_string(),
                "/TN".to_string(),
                config.task_name.clone(),
                "/TR".to_string(),
                task_run,
                "/SC".to_string(),
                "ONLOGON".to_string(),
                "/RL".to_string(),
                "HIGHEST".to_string(),
                "/F".to_string(),
            ],
        ))
    }

    /// `schtasks /Delete /TN <task> /F`
    pub fn schtasks_delete(config: &DaemonConfig) -> Self {
        Self::new(
            "schtasks",
            [
                "/Delete".to_string(),
                "/TN".to_string(),
                config.task_name.clone(),
                "/F".to_string(),
            ],
        )
    }

    /// Run the command, failing on spawn errors or a non-zero exit
    pub async fn run(&self) -> Result<()> {
        tracing::debug!(program = %self.program, args = ?self.args, "running service manager command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .await?;

        if output.status.success() {
            return Ok(());
        }

        Err(HapiError::ServiceCommand {
            program: self.program.clone(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Installer backed by one fixed command per lifecycle operation
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    install: ServiceCommand,
    uninstall: ServiceCommand,
}

impl CommandInstaller {
    pub fn new(install: ServiceCommand, uninstall: ServiceCommand) -> Self {
        CommandInstaller { install, uninstall }
    }

    /// launchd system domain registration
    pub fn launchd(config: &DaemonConfig) -> Self {
        Self::new(
            ServiceCommand::launchd_bootstrap(config),
            ServiceCommand::launchd_bootout(config),
        )
    }

    /// Windows scheduled task started at logon
    pub fn scheduled_task(config: &DaemonConfig, executable: &Path) -> Result<Self> {
        Ok(Self::new(
            ServiceCommand::schtasks_create(config, executable)?,
            ServiceCommand::schtasks_delete(config),
        ))
    }

    pub fn install_command(&self) -> &ServiceCommand {
        &self.install
    }

    pub fn uninstall_command(&self) -> &ServiceCommand {
        &self.uninstall
    }
}

#[async_trait]
impl DaemonInstaller for CommandInstaller {
    async fn install(&self) -> Result<()> {
        self.install.run().await
    }

    async fn uninstall(&self) -> Result<()> {
        self.uninstall.run().await
    }
}

/// OS service manager an installer talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceManager {
    Launchd,
    ScheduledTask,
}

/// Where daemon settings are read from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// `daemon.yaml` in the process's configuration root
    Process,
    /// `daemon.yaml` in the given directory
    Root(PathBuf),
    /// Settings already in memory
    Fixed(DaemonConfig),
}

impl ConfigSource {
    pub fn load(&self) -> Result<DaemonConfig> {
        match self {
            ConfigSource::Process => DaemonConfig::load_from_root(claude_config_dir()?),
            ConfigSource::Root(root) => DaemonConfig::load_from_root(root),
            ConfigSource::Fixed(config) => Ok(config.clone()),
        }
    }
}

/// Installer that reads its settings when an operation runs
///
/// Constructing one does no I/O, so a dispatcher built from it can reject
/// a request before any settings are loaded.
#[derive(Debug, Clone)]
pub struct ConfiguredInstaller {
    manager: ServiceManager,
    source: ConfigSource,
}

impl ConfiguredInstaller {
    pub fn new(manager: ServiceManager, source: ConfigSource) -> Self {
        ConfiguredInstaller { manager, source }
    }

    pub fn manager(&self) -> ServiceManager {
        self.manager
    }

    pub fn install_command(&self) -> Result<ServiceCommand> {
        let config = self.source.load()?;
        match self.manager {
            ServiceManager::Launchd => Ok(ServiceCommand::launchd_bootstrap(&config)),
            ServiceManager::ScheduledTask => {
                ServiceCommand::schtasks_create(&config, &config.executable()?)
            }
        }
    }

    pub fn uninstall_command(&self) -> Result<ServiceCommand> {
        let config = self.source.load()?;
        match self.manager {
            ServiceManager::Launchd => Ok(ServiceCommand::launchd_bootout(&config)),
            ServiceManager::ScheduledTask => Ok(ServiceCommand::schtasks_delete(&config)),
        }
    }
}

#[async_trait]
impl DaemonInstaller for ConfiguredInstaller {
    async fn install(&self) -> Result<()> {
        self.install_command()?.run().await
    }

    async fn uninstall(&self) -> Result<()> {
        self.uninstall_command()?.run().await
    }
}
