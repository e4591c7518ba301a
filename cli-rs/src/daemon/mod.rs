// Daemon Module - Background daemon installation and removal
//
// The dispatcher picks the installer for the running platform:
// 1. Windows - scheduled task (schtasks)
// 2. macOS   - launchd system daemon (launchctl), root only
// Other platforms are rejected before anything is touched.

pub mod config;
pub mod dispatcher;
pub mod installer;
pub mod platform;
pub mod service;

pub use config::{DaemonConfig, DAEMON_CONFIG_FILE};
pub use dispatcher::{DaemonAction, DaemonDispatcher};
pub use installer::{DaemonInstaller, PrivilegeCheck, ProcessPrivileges};
pub use platform::PlatformTarget;
pub use service::{
    CommandInstaller, ConfigSource, ConfiguredInstaller, ServiceCommand, ServiceManager,
};

use crate::errors::Result;

/// Install the daemon for the running platform
pub async fn install() -> Result<()> {
    DaemonDispatcher::for_current_platform().install().await
}

/// Uninstall the daemon for the running platform
pub async fn uninstall() -> Result<()> {
    DaemonDispatcher::for_current_platform().uninstall().await
}
