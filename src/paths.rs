//! Purpose: Resolve the resource config location for config-backed lookups.
//! Exports: `resource_config_path`, `resource_config_path_in`, and the path constants.
//! Role: Keep the CLI, API, and C ABI pointed at the same file from one source.
//! Invariants: Without an override the path is `/opt/ml/input/config/resourceconfig.json`.
//! Invariants: `SAGEMAKER_BASE_DIR` replaces only the `/opt/ml` prefix, and only when non-empty.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_DIR: &str = "/opt/ml";
pub const BASE_DIR_ENV: &str = "SAGEMAKER_BASE_DIR";
pub const RESOURCE_CONFIG_PATH: &str = "/opt/ml/input/config/resourceconfig.json";
pub const RESOURCE_CONFIG_FILE: &str = "resourceconfig.json";

pub fn resource_config_path() -> PathBuf {
    resource_config_path_for(std::env::var_os(BASE_DIR_ENV))
}

pub fn resource_config_path_in(base_dir: &Path) -> PathBuf {
    base_dir
        .join("input")
        .join("config")
        .join(RESOURCE_CONFIG_FILE)
}

fn resource_config_path_for(base_dir: Option<OsString>) -> PathBuf {
    match base_dir {
        Some(base_dir) if !base_dir.is_empty() => resource_config_path_in(Path::new(&base_dir)),
        _ => PathBuf::from(RESOURCE_CONFIG_PATH),
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::{Path, PathBuf};

    use super::{
        DEFAULT_BASE_DIR, RESOURCE_CONFIG_PATH, resource_config_path_for, resource_config_path_in,
    };

    #[test]
    fn default_base_dir_matches_fixed_path() {
        assert_eq!(
            resource_config_path_in(Path::new(DEFAULT_BASE_DIR)),
            PathBuf::from(RESOURCE_CONFIG_PATH)
        );
        assert_eq!(resource_config_path_for(None), PathBuf::from(RESOURCE_CONFIG_PATH));
    }

    #[test]
    fn override_replaces_base_dir() {
        assert_eq!(
            resource_config_path_for(Some(OsString::from("/tmp/local-ml"))),
            PathBuf::from("/tmp/local-ml/input/config/resourceconfig.json")
        );
    }

    #[test]
    fn empty_override_is_ignored() {
        assert_eq!(
            resource_config_path_for(Some(OsString::new())),
            PathBuf::from(RESOURCE_CONFIG_PATH)
        );
    }
}
