//! Error types for parsing, rasterization and button construction.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the crate's public operations.
///
/// None of these are retried internally: every input is deterministic, so
/// repeating a failed call with the same arguments fails the same way.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The vector source could not be turned into a [`VectorDocument`](crate::VectorDocument).
    #[error("malformed vector source: {0}")]
    MalformedSource(#[from] ParseError),

    /// The requested raster target is unusable (non-positive or non-finite size/scale).
    #[error("rasterization failed: {0}")]
    Rasterization(String),

    /// A checkout button was requested without a live delegate.
    #[error("a checkout delegate is required to create a button")]
    CallbackRequired,

    /// The vector source file could not be read.
    #[error("failed to read vector source {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Detailed reason a vector source was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("source is not valid UTF-8")]
    Encoding,

    #[error("invalid markup: {0}")]
    Markup(String),

    #[error("root element is <{0}>, expected <svg>")]
    UnexpectedRoot(String),

    #[error("no usable canvas size (viewBox or width/height)")]
    MissingCanvas,

    #[error("invalid value {value:?} for attribute `{attribute}`")]
    InvalidAttribute { attribute: String, value: String },

    #[error("path data: {0}")]
    PathData(#[from] PathDataError),
}

/// Violations of the path-data command grammar.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathDataError {
    #[error("path data must begin with a move-to, found `{found}`")]
    MissingMoveTo { found: char },

    #[error("unknown path command `{command}` at byte {offset}")]
    UnknownCommand { command: char, offset: usize },

    #[error("command `{command}` is missing coordinates at byte {offset}")]
    MissingCoordinates { command: char, offset: usize },

    #[error("invalid number at byte {offset}")]
    InvalidNumber { offset: usize },

    #[error("invalid arc flag at byte {offset}")]
    InvalidFlag { offset: usize },

    #[error("close-path at byte {offset} has no open subpath")]
    UnmatchedClose { offset: usize },
}
