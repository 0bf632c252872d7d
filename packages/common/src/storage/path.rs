use std::path::Path;

use super::error::StorageError;

/// Lower-cased extension of a file name without the leading dot, or `""` if it has none.
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Generate a collision-resistant object name that keeps the original extension.
///
/// Nothing but the extension is taken from the client-supplied name.
pub fn object_name(original_name: &str) -> String {
    let id = uuid::Uuid::new_v4();
    match extension_of(original_name).as_str() {
        "" => id.to_string(),
        ext => format!("{id}.{ext}"),
    }
}

/// Trim surrounding slashes from a logical folder and reject traversal.
///
/// An empty result means the storage root.
pub fn normalize_folder(folder: &str) -> Result<String, StorageError> {
    let trimmed = folder.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    check_relative(trimmed).map_err(|msg| StorageError::InvalidPath(format!("{folder}: {msg}")))?;
    Ok(trimmed.to_string())
}

/// Join a normalized folder and an object name into a storage key.
pub fn object_key(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{folder}/{name}")
    }
}

/// Validate a slash-separated relative key: no empty, `.` or `..` segments,
/// no backslashes, NUL or control characters.
pub(crate) fn check_relative(key: &str) -> Result<(), &'static str> {
    if key.chars().any(|c| c == '\\' || c.is_ascii_control()) {
        return Err("illegal character");
    }
    if key.starts_with('/') {
        return Err("absolute path");
    }
    for segment in key.split('/') {
        match segment {
            "" => return Err("empty segment"),
            "." | ".." => return Err("path traversal"),
            _ => {}
        }
    }
    Ok(())
}
