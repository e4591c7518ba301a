//! Integration tests for daemon settings and dispatcher wiring
//!
//! Tests the path from a configuration root to a ready dispatcher:
//! - daemon.yaml discovery in the configuration root
//! - Round trip through save/load
//! - Dispatcher construction for the running platform

use hapi_core::daemon::{CommandInstaller, DaemonConfig, DAEMON_CONFIG_FILE};
use hapi_core::{DaemonDispatcher, PlatformTarget};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_root_without_daemon_yaml() {
    let temp = TempDir::new().unwrap();

    let config = DaemonConfig::load_from_root(temp.path()).unwrap();

    assert_eq!(config, DaemonConfig::default());
}

#[test]
fn test_config_root_with_daemon_yaml() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(DAEMON_CONFIG_FILE),
        "label: dev.example.hapi\n\
         plistPath: /tmp/dev.example.hapi.plist\n\
         taskName: HAPI Dev\n\
         executable: /opt/hapi/bin/hapi\n",
    )
    .unwrap();

    let config = DaemonConfig::load_from_root(temp.path()).unwrap();

    assert_eq!(config.label, "dev.example.hapi");
    assert_eq!(config.plist_path(), PathBuf::from("/tmp/dev.example.hapi.plist"));
    assert_eq!(config.task_name, "HAPI Dev");
    assert_eq!(config.executable().unwrap(), PathBuf::from("/opt/hapi/bin/hapi"));
}

#[test]
fn test_saved_config_loads_back() {
    let temp = TempDir::new().unwrap();
    let config = DaemonConfig {
        label: "dev.example.saved".to_string(),
        daemon_args: vec!["--foreground".to_string()],
        ..DaemonConfig::default()
    };

    config.save(temp.path().join(DAEMON_CONFIG_FILE)).unwrap();

    assert_eq!(DaemonConfig::load_from_root(temp.path()).unwrap(), config);
}

#[test]
fn test_installers_follow_config() {
    let config = DaemonConfig {
        label: "dev.example.hapi".to_string(),
        task_name: "HAPI Dev".to_string(),
        ..DaemonConfig::default()
    };

    let launchd = CommandInstaller::launchd(&config);
    assert_eq!(launchd.install_command().program, "launchctl");
    assert_eq!(
        launchd.uninstall_command().args,
        vec!["bootout".to_string(), "system/dev.example.hapi".to_string()]
    );

    assert!(CommandInstaller::scheduled_task(&config, &PathBuf::from("hapi.exe")).is_err());

    let config = DaemonConfig {
        daemon_args: vec!["daemon".to_string(), "start".to_string()],
        ..config
    };
    let task = CommandInstaller::scheduled_task(&config, &PathBuf::from("hapi.exe")).unwrap();
    assert_eq!(task.install_command().program, "schtasks");
    assert!(task.uninstall_command().args.contains(&"HAPI Dev".to_string()));
}

#[test]
fn test_dispatcher_for_current_platform() {
    let temp = TempDir::new().unwrap();

    let dispatcher = DaemonDispatcher::for_current_platform_with_root(temp.path());

    assert_eq!(dispatcher.platform(), &PlatformTarget::current());
}

/// Nothing is installed on platforms without a supported service manager.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
#[tokio::test]
async fn test_install_rejected_on_this_platform() {
    let err = hapi_core::daemon::install().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Daemon installation is currently only supported on Windows and macOS"
    );
}

/// A broken daemon.yaml is never read when the platform is rejected.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
#[tokio::test]
async fn test_broken_daemon_yaml_still_reports_unsupported_platform() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(DAEMON_CONFIG_FILE), "label: [unclosed\n").unwrap();
    let dispatcher = DaemonDispatcher::for_current_platform_with_root(temp.path());

    let err = dispatcher.uninstall().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Daemon uninstallation is currently only supported on Windows and macOS"
    );
}
