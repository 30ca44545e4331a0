// `call(len)` surface shared by every host binding.
use std::fmt;
use std::path::Path;

use crate::core::error::Error;
use crate::core::{config_host, env_host};
use crate::paths::resource_config_path;

/// Where the current host name is read from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HostSource {
    /// `$SM_CURRENT_HOST`.
    Env,
    /// `current_host` in the resolved resourceconfig.json.
    ResourceConfig,
}

impl HostSource {
    pub fn as_str(self) -> &'static str {
        match self {
            HostSource::Env => "env",
            HostSource::ResourceConfig => "resource-config",
        }
    }
}

impl fmt::Display for HostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up the current host as if into a buffer of `len` bytes, so the
/// result holds at most `len - 1` bytes.
pub fn call(source: HostSource, len: usize) -> Result<String, Error> {
    match source {
        HostSource::Env => env_host::current_host(len),
        HostSource::ResourceConfig => config_host::current_host(&resource_config_path(), len),
    }
}

/// Config-backed [`call`] against an explicit file.
pub fn call_with_path(path: &Path, len: usize) -> Result<String, Error> {
    config_host::current_host(path, len)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{HostSource, call, call_with_path};
    use crate::core::error::ErrorKind;

    #[test]
    fn source_labels_are_stable() {
        assert_eq!(HostSource::Env.to_string(), "env");
        assert_eq!(HostSource::ResourceConfig.to_string(), "resource-config");
    }

    #[test]
    fn call_rejects_zero_len_for_every_source() {
        let err = call(HostSource::ResourceConfig, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        let err = call(HostSource::Env, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn call_with_path_reads_example_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("resourceconfig.json");
        fs::write(
            &path,
            r#"{"current_host": "algo-1", "hosts": ["algo-1","algo-2"]}"#,
        )
        .expect("write");
        assert_eq!(call_with_path(&path, 40).expect("host"), "algo-1");
    }

    #[test]
    fn call_with_path_reports_missing_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("resourceconfig.json");
        fs::write(&path, r#"{"hosts": ["algo-1"]}"#).expect("write");
        let err = call_with_path(&path, 40).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldNotFound);
    }
}
