// Current-host lookup from the `current_host` field of resourceconfig.json.
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::core::bounded::{copy_terminated, truncate_str};
use crate::core::error::{Error, ErrorKind};
use crate::json::parse::hint_for_error;
use crate::json::token::{TokenKind, top_level_members};

pub const CURRENT_HOST_FIELD: &str = "current_host";

/// Writes the `current_host` value from `path` into `buf`, truncated and NUL-terminated.
///
/// Values containing a NUL character are rejected as `Parse`, so the
/// terminator always marks the end of the value.
pub fn lookup(path: &Path, buf: &mut [u8]) -> Result<usize, Error> {
    if buf.is_empty() {
        return Err(Error::new(ErrorKind::Usage).with_message("buffer capacity must be at least 1"));
    }
    let host = read_field(path, CURRENT_HOST_FIELD)?;
    copy_terminated(buf, host.as_bytes())
}

/// Returns the `current_host` value from `path` truncated to fit `capacity` bytes.
pub fn current_host(path: &Path, capacity: usize) -> Result<String, Error> {
    if capacity == 0 {
        return Err(Error::new(ErrorKind::Usage).with_message("buffer capacity must be at least 1"));
    }
    let host = read_field(path, CURRENT_HOST_FIELD)?;
    Ok(truncate_str(&host, capacity)?.to_string())
}

/// Reads `path` and returns the decoded string value of the first top-level
/// member named `field`.
pub fn read_field(path: &Path, field: &str) -> Result<String, Error> {
    let bytes = fs::read(path).map_err(|err| {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            _ => ErrorKind::Io,
        };
        Error::new(kind)
            .with_message("failed to read resource config")
            .with_path(path)
            .with_source(err)
    })?;
    let doc = std::str::from_utf8(&bytes).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message("resource config is not valid UTF-8")
            .with_path(path)
            .with_source(err)
    })?;
    let value = field_in_document(doc, field).map_err(|err| err.with_path(path))?;
    debug!(path = %path.display(), field, len = value.len(), "read field from resource config");
    Ok(value)
}

fn field_in_document(doc: &str, field: &str) -> Result<String, Error> {
    let members = top_level_members(doc).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message("invalid resource config json")
            .with_hint(hint_for_error(&err, "resource config"))
            .with_position(err.line(), err.column())
            .with_source(err)
    })?;

    let Some(member) = members.iter().find(|member| member.key == field) else {
        return Err(Error::new(ErrorKind::FieldNotFound)
            .with_message(format!("top-level field `{field}` not found")));
    };
    if member.value.kind != TokenKind::String {
        return Err(Error::new(ErrorKind::Parse).with_message(format!(
            "field `{field}` must be a string, found {}",
            member.value.kind.label()
        )));
    }
    let (line, column) = position_of(doc, member.value.start);
    let value = serde_json::from_str::<String>(member.value.text(doc)).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message(format!("string field `{field}` cannot be decoded"))
            .with_hint(hint_for_error(&err, "resource config"))
            .with_position(line, column)
            .with_source(err)
    })?;
    if value.contains('\0') {
        return Err(Error::new(ErrorKind::Parse)
            .with_message(format!("field `{field}` contains a NUL character"))
            .with_position(line, column));
    }
    Ok(value)
}

// 1-based line and byte column of `offset` within `doc`.
fn position_of(doc: &str, offset: usize) -> (usize, usize) {
    let before = &doc[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    (line, offset - line_start + 1)
}
