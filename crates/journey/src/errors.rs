//! Error definitions for the glue code of `journey`

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    /// The source is not valid JavaScript/TypeScript
    #[error("Failed to parse {filename}:{line}: {message}")]
    Parse {
        filename: String,
        line: usize,
        message: String,
    },

    /// An input could not be read or an output could not be written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serializing the transformed module failed
    #[error("Failed to generate code: {0}")]
    Codegen(#[source] io::Error),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to walk the input directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl CompileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> CompileError {
        CompileError::Io {
            path: path.into(),
            source,
        }
    }
}
