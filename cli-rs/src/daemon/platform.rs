//! Operating system identity used to route daemon requests

use std::fmt;

/// Platform the daemon lifecycle request is routed for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlatformTarget {
    /// Scheduled task via `schtasks`
    Windows,
    /// launchd via `launchctl`
    MacOs,
    /// Anything else, carrying the OS name (`linux`, `freebsd`, ...)
    Other(String),
}

impl PlatformTarget {
    /// Platform of the running process
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a target
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => PlatformTarget::Windows,
            "macos" => PlatformTarget::MacOs,
            other => PlatformTarget::Other(other.to_string()),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, PlatformTarget::Other(_))
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformTarget::Windows => write!(f, "Windows"),
            PlatformTarget::MacOs => write!(f, "macOS"),
            PlatformTarget::Other(os) => write!(f, "{}", os),
        }
    }
}
