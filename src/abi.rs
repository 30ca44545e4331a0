//! Purpose: C ABI bridge for host bindings (libsm_hostname).
//! Exports: `smh_env_host`, `smh_config_host`, `smh_error_free`, and the `preload` `gethostname`.
//! Role: Stable ABI surface for interpreters and LD_PRELOAD consumers.
//! Invariants: Caller owns the name buffer; writes stay within `len` bytes and end in NUL.
//! Invariants: Error kinds map 1:1 with core error kinds and CLI exit codes.
//! Notes: `gethostname` is only exported with the `preload` feature on Linux.

use crate::core::error::{Error, ErrorKind, to_exit_code};
use crate::core::{config_host, env_host};
use crate::paths::resource_config_path;
use libc::c_char;
use std::ffi::{CStr, CString};
use std::path::PathBuf;
use std::ptr;

#[repr(C)]
pub struct smh_error {
    kind: i32,
    message: *mut c_char,
    path: *mut c_char,
}

/// Copies `$SM_CURRENT_HOST` into `name` (capacity `len`). Returns 0 or -1.
#[unsafe(no_mangle)]
pub extern "C" fn smh_env_host(
    name: *mut c_char,
    len: usize,
    out_err: *mut *mut smh_error,
) -> i32 {
    let buf = match borrow_name_buf(name, len) {
        Ok(buf) => buf,
        Err(err) => return fail(out_err, err),
    };
    match env_host::lookup(buf) {
        Ok(_) => 0,
        Err(err) => fail(out_err, err),
    }
}

/// Copies `current_host` from the resource config into `name` (capacity `len`).
/// A null `path` selects the resolved default location. Returns 0 or -1.
#[unsafe(no_mangle)]
pub extern "C" fn smh_config_host(
    path: *const c_char,
    name: *mut c_char,
    len: usize,
    out_err: *mut *mut smh_error,
) -> i32 {
    let path = match parse_path(path) {
        Ok(path) => path,
        Err(err) => return fail(out_err, err),
    };
    let buf = match borrow_name_buf(name, len) {
        Ok(buf) => buf,
        Err(err) => return fail(out_err, err),
    };
    match config_host::lookup(&path, buf) {
        Ok(_) => 0,
        Err(err) => fail(out_err, err),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn smh_error_free(err: *mut smh_error) {
    if err.is_null() {
        return;
    }
    unsafe {
        let err = Box::from_raw(err);
        if !err.message.is_null() {
            drop(CString::from_raw(err.message));
        }
        if !err.path.is_null() {
            drop(CString::from_raw(err.path));
        }
    }
}

/// POSIX `gethostname` answered from the resource config, for `LD_PRELOAD`.
#[cfg(all(feature = "preload", target_os = "linux"))]
#[unsafe(no_mangle)]
pub extern "C" fn gethostname(name: *mut c_char, len: libc::size_t) -> libc::c_int {
    let result = borrow_name_buf(name, len)
        .and_then(|buf| config_host::lookup(&resource_config_path(), buf));
    match result {
        Ok(_) => 0,
        Err(err) => {
            unsafe {
                *libc::__errno_location() = errno_for(err.kind());
            }
            -1
        }
    }
}

/// errno reported by the preloaded `gethostname` for a failed lookup.
#[cfg(target_os = "linux")]
#[cfg_attr(not(feature = "preload"), allow(dead_code))]
fn errno_for(kind: ErrorKind) -> libc::c_int {
    match kind {
        ErrorKind::FileNotFound => libc::ENOENT,
        ErrorKind::Io => libc::EIO,
        _ => libc::EINVAL,
    }
}

fn borrow_name_buf<'a>(name: *mut c_char, len: usize) -> Result<&'a mut [u8], Error> {
    if name.is_null() {
        return Err(Error::new(ErrorKind::Usage).with_message("name is null"));
    }
    if len == 0 {
        return Err(Error::new(ErrorKind::Usage).with_message("len must be at least 1"));
    }
    // Caller guarantees `name` points at `len` writable bytes.
    unsafe { Ok(std::slice::from_raw_parts_mut(name.cast::<u8>(), len)) }
}

fn parse_path(input: *const c_char) -> Result<PathBuf, Error> {
    if input.is_null() {
        return Ok(resource_config_path());
    }
    let raw = unsafe { CStr::from_ptr(input) }
        .to_str()
        .map_err(|_| Error::new(ErrorKind::Usage).with_message("path is not valid UTF-8"))?;
    Ok(PathBuf::from(raw))
}

fn fail(out_err: *mut *mut smh_error, err: Error) -> i32 {
    if out_err.is_null() {
        return -1;
    }
    let error = Box::new(smh_error {
        kind: to_exit_code(err.kind()),
        message: to_c_string(&err.to_string()),
        path: err
            .path()
            .map(|path| to_c_string(path.to_string_lossy().as_ref()))
            .unwrap_or(ptr::null_mut()),
    });
    unsafe {
        *out_err = Box::into_raw(error);
    }
    -1
}

fn to_c_string(input: &str) -> *mut c_char {
    CString::new(input)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}
