//! Purpose: Define the stable public Rust API boundary for current-host lookups.
//! Exports: Lookup entry points, path helpers, and error types needed by the CLI and C ABI.
//! Role: Public, additive-only surface; hides the JSON tokenizer.
//! Invariants: Every lookup returns a typed `Error`; nothing here prints or exits.

mod call;

pub use crate::core::bounded::{copy_terminated, truncate_str};
pub use crate::core::config_host::{self, CURRENT_HOST_FIELD};
pub use crate::core::env_host::{self, CURRENT_HOST_ENV};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::paths::{
    BASE_DIR_ENV, DEFAULT_BASE_DIR, RESOURCE_CONFIG_PATH, resource_config_path,
    resource_config_path_in,
};
pub use call::{HostSource, call, call_with_path};
