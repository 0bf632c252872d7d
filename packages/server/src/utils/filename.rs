/// Reasons a client-supplied upload filename is rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains null bytes.
    NullByte,
    /// Filename contains control characters (CR, LF, etc.).
    ControlCharacter,
    /// Filename has no stem, e.g. `.png`.
    Hidden,
}

impl FilenameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
            Self::Hidden => "Invalid filename: a name is required before the extension",
        }
    }
}

/// Reduce an upload filename to its final component and sanity-check it.
///
/// Some clients send full local paths (`C:\fakepath\logo.png`); only the last
/// segment is kept. Storage never uses more than the extension of the result.
pub fn upload_file_name(raw: &str) -> Result<&str, FilenameError> {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw)
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(FilenameError::Empty);
    }
    if name.contains('\0') {
        return Err(FilenameError::NullByte);
    }
    if name.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }
    if name.starts_with('.') {
        return Err(FilenameError::Hidden);
    }
    Ok(name)
}
