use crate::editing::Document;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File is not valid UTF-8: {0}")]
    InvalidUtf8(PathBuf),
}

/// Read an outline file into a fresh document with the point at the top.
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Document::from_bytes(&bytes).map_err(|_| IoError::InvalidUtf8(path.to_path_buf()))
}

/// Write the document text. Annotations are display-only and never reach
/// the file.
pub fn write_document(path: &Path, document: &Document) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document.to_bytes())?;
    Ok(())
}
