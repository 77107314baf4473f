//! Error types for autoconf-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "No candidate modules found for extension point '{key}'. If you are using a custom \
         packaging, make sure that {file} is present in a catalog root and registers that key."
    )]
    CatalogEmpty { key: String, file: &'static str },

    #[error("Invalid file at {path}: {message}")]
    InvalidFile { path: PathBuf, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// The registry for `key` yielded no candidates.
    pub fn catalog_empty(key: impl Into<String>) -> Self {
        Self::CatalogEmpty {
            key: key.into(),
            file: crate::CATALOG_FILENAME,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
