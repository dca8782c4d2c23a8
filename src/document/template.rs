//! Template sources.
//!
//! Every call to [`TemplateSource::load`] hands out a fresh copy of the blank
//! template, so concurrent assemblies never share a document in memory.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::DocumentError;

pub trait TemplateSource: Send + Sync {
    fn load(&self) -> Result<Vec<u8>, DocumentError>;
}

/// Template read from disk on every request.
#[derive(Debug, Clone)]
pub struct FileTemplateSource {
    path: PathBuf,
}

impl FileTemplateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemplateSource for FileTemplateSource {
    fn load(&self) -> Result<Vec<u8>, DocumentError> {
        fs::read(&self.path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => DocumentError::TemplateNotFound(self.path.display().to_string()),
            _ => DocumentError::TemplateIo(err),
        })
    }
}

/// Template held in memory, e.g. embedded at build time.
#[derive(Debug, Clone)]
pub struct BytesTemplateSource {
    bytes: Vec<u8>,
}

impl BytesTemplateSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl TemplateSource for BytesTemplateSource {
    fn load(&self) -> Result<Vec<u8>, DocumentError> {
        Ok(self.bytes.clone())
    }
}
