//! Error types for HAPI CLI Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HapiError {
    #[error("{0}")]
    PrivilegeRequired(String),

    #[error("{0}")]
    UnsupportedPlatform(String),

    /// Failure reported by a `DaemonInstaller` implemented outside this crate
    #[error("Installer error: {0}")]
    Installer(String),

    #[error("`{program}` exited with {status}: {stderr}")]
    ServiceCommand {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, HapiError>;
