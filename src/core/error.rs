//! Error types for document I/O

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while moving a document between memory and disk
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Cannot read file {}:\n{source}.", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write file {}:\n{source}.", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read file {}:\nthe file is not valid UTF-8 text.", .path.display())]
    Encoding { path: PathBuf },
}

impl DocumentError {
    /// Path the failed operation was working on
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::Encoding { path } => path,
        }
    }
}
