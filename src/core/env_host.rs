// Current-host lookup from the SM_CURRENT_HOST environment variable.
use std::ffi::OsString;

use tracing::debug;

use crate::core::bounded::{copy_terminated, truncate_str};
use crate::core::error::{Error, ErrorKind};

pub const CURRENT_HOST_ENV: &str = "SM_CURRENT_HOST";

/// Writes `$SM_CURRENT_HOST` into `buf` as raw bytes, truncated and NUL-terminated.
pub fn lookup(buf: &mut [u8]) -> Result<usize, Error> {
    lookup_var(CURRENT_HOST_ENV, buf)
}

pub fn lookup_var(name: &str, buf: &mut [u8]) -> Result<usize, Error> {
    copy_from_value(name, std::env::var_os(name), buf)
}

/// Returns `$SM_CURRENT_HOST` truncated to fit a buffer of `capacity` bytes.
pub fn current_host(capacity: usize) -> Result<String, Error> {
    current_host_from(CURRENT_HOST_ENV, capacity)
}

pub fn current_host_from(name: &str, capacity: usize) -> Result<String, Error> {
    host_from_value(name, std::env::var_os(name), capacity)
}

fn copy_from_value(name: &str, value: Option<OsString>, buf: &mut [u8]) -> Result<usize, Error> {
    check_capacity(buf.len())?;
    let value = read_var(name, value)?;
    let copied = copy_terminated(buf, value.as_encoded_bytes())?;
    debug!(var = name, copied, "copied current host from environment");
    Ok(copied)
}

fn host_from_value(name: &str, value: Option<OsString>, capacity: usize) -> Result<String, Error> {
    check_capacity(capacity)?;
    let value = read_var(name, value)?.into_string().map_err(|_| {
        Error::new(ErrorKind::VariableNotSet)
            .with_message(format!("{name} is not valid UTF-8"))
    })?;
    let host = truncate_str(&value, capacity)?;
    debug!(var = name, len = host.len(), "read current host from environment");
    Ok(host.to_string())
}

fn check_capacity(capacity: usize) -> Result<(), Error> {
    if capacity == 0 {
        return Err(Error::new(ErrorKind::Usage).with_message("buffer capacity must be at least 1"));
    }
    Ok(())
}

fn read_var(name: &str, value: Option<OsString>) -> Result<OsString, Error> {
    value.ok_or_else(|| {
        Error::new(ErrorKind::VariableNotSet)
            .with_message(format!("{name} is not set"))
            .with_hint(format!("export {name}=<host> before starting the process"))
    })
}
