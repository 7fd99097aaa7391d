//! Typed errors for loading font files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading font data from disk.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be read.
    #[error("failed to read font file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a parsable TrueType/OpenType face.
    #[error("{path:?} does not contain a usable font face at index {face_index}")]
    InvalidFontData { path: PathBuf, face_index: u32 },
}
