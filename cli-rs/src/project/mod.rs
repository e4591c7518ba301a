/**
 * project module
 * Per-project storage location under the configuration root
 */

pub mod path;
pub mod root;

pub use path::{
    get_project_path, project_path, resolve_path, sanitize_project_name, PROJECTS_DIR_NAME,
};
pub use root::{
    claude_config_dir, ConfigRoot, PathEnvironment, CONFIG_DIR_ENV, DEFAULT_CONFIG_DIR_NAME,
};
