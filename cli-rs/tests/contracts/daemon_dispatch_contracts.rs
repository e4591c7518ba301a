// Daemon Dispatch Contract Tests
//
// These tests verify that the dispatcher refuses requests BEFORE reaching
// any platform installer when a precondition fails, and that installer
// outcomes reach the caller unchanged.

use async_trait::async_trait;
use hapi_core::errors::Result;
use hapi_core::{DaemonDispatcher, DaemonInstaller, HapiError, PlatformTarget, PrivilegeCheck};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Installer that counts every call it receives
#[derive(Clone, Default)]
struct CountingInstaller {
    calls: Arc<AtomicUsize>,
}

impl CountingInstaller {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DaemonInstaller for CountingInstaller {
    async fn install(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn uninstall(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Installer that always fails with a service manager error
struct FailingInstaller;

#[async_trait]
impl DaemonInstaller for FailingInstaller {
    async fn install(&self) -> Result<()> {
        Err(HapiError::ServiceCommand {
            program: "launchctl".to_string(),
            status: "exit status: 5".to_string(),
            stderr: "Bootstrap failed: 5: Input/output error".to_string(),
        })
    }

    async fn uninstall(&self) -> Result<()> {
        Err(HapiError::Installer("task not found".to_string()))
    }
}

/// Privilege check that counts how often it is consulted
#[derive(Clone, Default)]
struct CountingPrivileges {
    elevated: bool,
    checks: Arc<AtomicUsize>,
}

impl PrivilegeCheck for CountingPrivileges {
    fn is_elevated(&self) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.elevated
    }
}

fn counting_dispatcher(
    platform: PlatformTarget,
    privileges: CountingPrivileges,
) -> (DaemonDispatcher, CountingInstaller, CountingInstaller) {
    let windows = CountingInstaller::default();
    let macos = CountingInstaller::default();
    let dispatcher = DaemonDispatcher::new(
        platform,
        Box::new(windows.clone()),
        Box::new(macos.clone()),
        Box::new(privileges),
    );
    (dispatcher, windows, macos)
}

/// WHY: Unsupported platforms must fail without side effects
/// BREAKS: A half-registered service on an OS we cannot manage
#[tokio::test]
async fn unsupported_platform_never_reaches_an_installer() {
    for os in ["linux", "freebsd", "android"] {
        let (dispatcher, windows, macos) =
            counting_dispatcher(PlatformTarget::from_os(os), CountingPrivileges::default());

        let install = dispatcher.install().await;
        let uninstall = dispatcher.uninstall().await;

        assert!(matches!(install, Err(HapiError::UnsupportedPlatform(_))));
        assert!(matches!(uninstall, Err(HapiError::UnsupportedPlatform(_))));
        assert_eq!(windows.calls(), 0, "windows installer called on {}", os);
        assert_eq!(macos.calls(), 0, "macos installer called on {}", os);
    }
}

/// WHY: launchd system daemons need root; the check runs first
/// BREAKS: Confusing launchctl permission errors instead of a clear message
#[tokio::test]
async fn macos_without_root_never_reaches_an_installer() {
    let privileges = CountingPrivileges::default();
    let (dispatcher, windows, macos) =
        counting_dispatcher(PlatformTarget::MacOs, privileges.clone());

    let install = dispatcher.install().await.unwrap_err();
    let uninstall = dispatcher.uninstall().await.unwrap_err();

    assert_eq!(
        install.to_string(),
        "Daemon installation requires sudo privileges. Please run with sudo."
    );
    assert_eq!(
        uninstall.to_string(),
        "Daemon uninstallation requires sudo privileges. Please run with sudo."
    );
    assert_eq!(macos.calls(), 0);
    assert_eq!(windows.calls(), 0);
    assert_eq!(privileges.checks.load(Ordering::SeqCst), 2);
}

/// WHY: The privilege requirement is macOS only
#[tokio::test]
async fn windows_does_not_consult_privileges() {
    let privileges = CountingPrivileges::default();
    let (dispatcher, windows, macos) =
        counting_dispatcher(PlatformTarget::Windows, privileges.clone());

    dispatcher.install().await.unwrap();
    dispatcher.uninstall().await.unwrap();

    assert_eq!(windows.calls(), 2);
    assert_eq!(macos.calls(), 0);
    assert_eq!(privileges.checks.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn macos_as_root_delegates_once_per_request() {
    let privileges = CountingPrivileges {
        elevated: true,
        ..CountingPrivileges::default()
    };
    let (dispatcher, windows, macos) = counting_dispatcher(PlatformTarget::MacOs, privileges);

    dispatcher.install().await.unwrap();

    assert_eq!(macos.calls(), 1);
    assert_eq!(windows.calls(), 0);
}

/// WHY: Installer failures are reported as the installer raised them
/// REASON: No retry, no wrapping; the caller sees the service manager output
#[tokio::test]
async fn installer_failure_is_passed_through_unchanged() {
    let privileges = CountingPrivileges {
        elevated: true,
        ..CountingPrivileges::default()
    };
    let dispatcher = DaemonDispatcher::new(
        PlatformTarget::MacOs,
        Box::new(CountingInstaller::default()),
        Box::new(FailingInstaller),
        Box::new(privileges),
    );

    match dispatcher.install().await.unwrap_err() {
        HapiError::ServiceCommand { program, stderr, .. } => {
            assert_eq!(program, "launchctl");
            assert_eq!(stderr, "Bootstrap failed: 5: Input/output error");
        }
        other => panic!("Expected ServiceCommand variant, got {:?}", other),
    }

    match dispatcher.uninstall().await.unwrap_err() {
        HapiError::Installer(msg) => assert_eq!(msg, "task not found"),
        other => panic!("Expected Installer variant, got {:?}", other),
    }
}
