/**
 * dispatcher.rs
 * Routes daemon install/uninstall requests to the platform installer
 *
 * Routing:
 * - Windows: scheduled task installer
 * - macOS:   launchd installer, only when running as root
 * - other:   rejected, no installer is touched
 *
 * Every call is a single-shot dispatch. Installer errors are returned as-is.
 */

use std::path::PathBuf;

use crate::daemon::installer::{DaemonInstaller, PrivilegeCheck, ProcessPrivileges};
use crate::daemon::platform::PlatformTarget;
use crate::daemon::service::{ConfigSource, ConfiguredInstaller, ServiceManager};
use crate::errors::{HapiError, Result};

/// Lifecycle request handled by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonAction {
    Install,
    Uninstall,
}

impl DaemonAction {
    fn noun(&self) -> &'static str {
        match self {
            DaemonAction::Install => "installation",
            DaemonAction::Uninstall => "uninstallation",
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            DaemonAction::Install => "Installing",
            DaemonAction::Uninstall => "Uninstalling",
        }
    }
}

/// Daemon lifecycle dispatcher
pub struct DaemonDispatcher {
    platform: PlatformTarget,
    windows: Box<dyn DaemonInstaller>,
    macos: Box<dyn DaemonInstaller>,
    privileges: Box<dyn PrivilegeCheck>,
}

impl DaemonDispatcher {
    pub fn new(
        platform: PlatformTarget,
        windows: Box<dyn DaemonInstaller>,
        macos: Box<dyn DaemonInstaller>,
        privileges: Box<dyn PrivilegeCheck>,
    ) -> Self {
        DaemonDispatcher {
            platform,
            windows,
            macos,
            privileges,
        }
    }

    /// Dispatcher for the running process, backed by `schtasks`/`launchctl`
    ///
    /// Settings come from `daemon.yaml` in the configuration root and are
    /// read by the chosen installer, after the platform and privilege checks.
    pub fn for_current_platform() -> Self {
        Self::with_config_source(ConfigSource::Process)
    }

    /// Like `for_current_platform`, reading `daemon.yaml` from `config_root`
    pub fn for_current_platform_with_root<P: Into<PathBuf>>(config_root: P) -> Self {
        Self::with_config_source(ConfigSource::Root(config_root.into()))
    }

    /// Dispatcher for the running platform with settings from `source`
    pub fn with_config_source(source: ConfigSource) -> Self {
        Self::new(
            PlatformTarget::current(),
            Box::new(ConfiguredInstaller::new(
                ServiceManager::ScheduledTask,
                source.clone(),
            )),
            Box::new(ConfiguredInstaller::new(ServiceManager::Launchd, source)),
            Box::new(ProcessPrivileges),
        )
    }

    pub fn platform(&self) -> &PlatformTarget {
        &self.platform
    }

    pub async fn install(&self) -> Result<()> {
        self.dispatch(DaemonAction::Install).await
    }

    pub async fn uninstall(&self) -> Result<()> {
        self.dispatch(DaemonAction::Uninstall).await
    }

    pub async fn dispatch(&self, action: DaemonAction) -> Result<()> {
        let installer = self.installer_for(action)?;

        tracing::info!("{} HAPI CLI daemon for {}...", action.verb(), self.platform);

        match action {
            DaemonAction::Install => installer.install().await,
            DaemonAction::Uninstall => installer.uninstall().await,
        }
    }

    /// Pick the installer, enforcing preconditions before any side effect.
    fn installer_for(&self, action: DaemonAction) -> Result<&dyn DaemonInstaller> {
        match &self.platform {
            PlatformTarget::Windows => Ok(self.windows.as_ref()),
            PlatformTarget::MacOs => {
                if !self.privileges.is_elevated() {
                    return Err(HapiError::PrivilegeRequired(format!(
                        "Daemon {} requires sudo privileges. Please run with sudo.",
                        action.noun()
                    )));
                }
                Ok(self.macos.as_ref())
            }
            PlatformTarget::Other(_) => Err(HapiError::UnsupportedPlatform(format!(
                "Daemon {} is currently only supported on Windows and macOS",
                action.noun()
            ))),
        }
    }
}
