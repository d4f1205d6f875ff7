use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Resource not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },

    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid demo configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl DemoError {
    pub fn resource_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ResourceNotFound { path: path.into() }
    }

    /// Maps an open failure, keeping `NotFound` as its own variant.
    pub fn from_open(path: impl Into<PathBuf>, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::resource_not_found(path),
            _ => Self::Io(err),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}
