//! Collaborator seams of the daemon dispatcher
//!
//! The dispatcher never registers services itself. It hands the request to a
//! `DaemonInstaller` for the target platform and asks a `PrivilegeCheck`
//! whether the process may do so.

use async_trait::async_trait;

use crate::errors::Result;

/// Platform-specific service registration
///
/// Implementations report failure through the returned error; the
/// dispatcher passes it to the caller untouched.
#[async_trait]
pub trait DaemonInstaller: Send + Sync {
    /// Register and start the background daemon
    async fn install(&self) -> Result<()>;

    /// Stop and unregister the background daemon
    async fn uninstall(&self) -> Result<()>;
}

/// Whether the current process runs with elevated privileges
pub trait PrivilegeCheck: Send + Sync {
    fn is_elevated(&self) -> bool;
}

/// Privilege check against the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessPrivileges;

impl PrivilegeCheck for ProcessPrivileges {
    #[cfg(unix)]
    fn is_elevated(&self) -> bool {
        nix::unistd::getuid().is_root()
    }

    // Only consulted on macOS.
    #[cfg(not(unix))]
    fn is_elevated(&self) -> bool {
        false
    }
}
