/**
 * path.rs
 * Per-project storage path derivation
 *
 * A working directory maps to `<config-root>/projects/<project-id>` where the
 * project id is the absolute path flattened into a single segment:
 *
 * ```text
 * /Users/steve/projects/my-app  ->  -Users-steve-projects-my-app
 * C:\Users\test                 ->  C-Users-test
 * ```
 *
 * The mapping is not injective (`/a//b` and `/a..b` both become `-a--b`).
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Component, Path, PathBuf};

use crate::errors::Result;
use crate::project::root::{ConfigRoot, PathEnvironment};

/// Subdirectory of the configuration root holding per-project storage
pub const PROJECTS_DIR_NAME: &str = "projects";

// Drive colon: a colon directly followed by a separator (separators are
// already normalized to `/` when this runs).
static DRIVE_COLON_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":(/)").expect("Invalid regex"));
static RESERVED_CHAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[/.:_]").expect("Invalid regex"));

/// Flatten a path into a project identifier.
///
/// Backslashes become `/`, drive colons (`C:/`) are dropped, then every `/`,
/// `.`, `:` and `_` is replaced by one `-`. Runs of reserved characters are
/// not collapsed.
///
/// # Example
/// ```
/// use hapi_core::sanitize_project_name;
///
/// assert_eq!(sanitize_project_name("/Users/steve/projects/my-app"), "-Users-steve-projects-my-app");
/// assert_eq!(sanitize_project_name("C:\\Users\\test"), "C-Users-test");
/// assert_eq!(sanitize_project_name("/var/www/my.site.com"), "-var-www-my-site-com");
/// ```
pub fn sanitize_project_name(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let without_drive_colon = DRIVE_COLON_PATTERN.replace_all(&normalized, "$1");
    RESERVED_CHAR_PATTERN
        .replace_all(&without_drive_colon, "-")
        .into_owned()
}

/// Resolve `path` against `base` lexically.
///
/// Relative inputs are joined onto `base`, `.` segments are dropped and `..`
/// pops the previous segment (never past the root). The filesystem is not
/// touched, so symlinks are left as written.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(segment) => resolved.push(segment),
        }
    }
    resolved
}

/// Storage path for `working_dir` under the given environment.
///
/// Pure: everything process-global comes in through `environment`. The
/// current directory is only needed for relative input and the home
/// directory only when no override is set.
pub fn project_path<P: AsRef<Path>>(
    working_dir: P,
    environment: &PathEnvironment,
) -> Result<PathBuf> {
    let working_dir = working_dir.as_ref();
    let resolved = if working_dir.is_absolute() {
        resolve_path(Path::new(""), working_dir)
    } else {
        resolve_path(environment.current_dir()?, working_dir)
    };
    let project_id = sanitize_project_name(&resolved.to_string_lossy());

    Ok(ConfigRoot::resolve(environment)?
        .into_path_buf()
        .join(PROJECTS_DIR_NAME)
        .join(project_id))
}

/// Storage path for `working_dir` using the running process's environment.
///
/// Reads `CLAUDE_CONFIG_DIR`, and the home and current directories when the
/// input needs them. The returned directory is not created.
pub fn get_project_path<P: AsRef<Path>>(working_dir: P) -> Result<PathBuf> {
    let environment = PathEnvironment::from_process();
    let path = project_path(working_dir, &environment)?;
    tracing::debug!(path = %path.display(), "resolved project path");
    Ok(path)
}
