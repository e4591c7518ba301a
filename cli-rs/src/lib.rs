//! # HAPI CLI Core
//!
//! Library behind the `hapi` command-line tool. Two independent pieces:
//!
//! - **Project paths**: every working directory gets a storage directory
//!   under the configuration root, named by flattening its absolute path
//!   (`/Users/steve/my-app` becomes `-Users-steve-my-app`).
//! - **Daemon lifecycle**: install/uninstall of the background daemon through
//!   the OS service manager (scheduled tasks on Windows, launchd on macOS).
//!
//! ## Layout
//!
//! ```text
//! $CLAUDE_CONFIG_DIR (or ~/.claude)
//! ├── daemon.yaml            optional daemon settings
//! └── projects/
//!     └── -Users-steve-my-app/
//! ```

pub mod daemon;
pub mod errors;
pub mod project;

pub use daemon::{
    CommandInstaller, DaemonAction, DaemonConfig, DaemonDispatcher, DaemonInstaller,
    PlatformTarget, PrivilegeCheck, ProcessPrivileges, ServiceCommand,
};
pub use errors::HapiError;
pub use project::{
    claude_config_dir, get_project_path, project_path, sanitize_project_name, ConfigRoot,
    PathEnvironment,
};

/// Version of the HAPI CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
