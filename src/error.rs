//! Error types for loading a run and persisting its result.
//!
//! Running out of battery or getting stuck are *not* errors: they are terminal
//! [`RunStatus`](crate::RunStatus) values and still produce an output record.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fallible cleaner operations.
pub type Result<T> = std::result::Result<T, CleanerError>;

/// Errors raised before a run starts or while writing its output.
#[derive(Debug, Error)]
pub enum CleanerError {
    /// The input file could not be opened or read.
    #[error("failed to read input file {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not valid JSON or does not have the expected shape.
    #[error("failed to parse input file {path}: {source}")]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The room map cannot be used as a grid.
    #[error("invalid room map: {reason}")]
    InvalidMap {
        /// Description of what was wrong with the map.
        reason: String,
    },

    /// The starting heading is not one of `N`, `E`, `S`, `W`.
    #[error("unknown heading code: {code:?}")]
    UnknownHeading { code: String },

    /// The starting position lies outside the room.
    #[error("start position ({x}, {y}) is outside the {width}x{height} room")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// The final state could not be encoded as JSON.
    #[error("failed to encode output: {0}")]
    EncodeOutput(#[source] serde_json::Error),

    /// The output file could not be written.
    #[error("failed to write output file {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CleanerError {
    /// Create an `InvalidMap` error with the given reason.
    #[must_use]
    pub fn invalid_map(reason: impl Into<String>) -> Self {
        Self::InvalidMap {
            reason: reason.into(),
        }
    }

    /// Whether the error happened on the input side (the run never started).
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::EncodeOutput(_) | Self::WriteOutput { .. })
    }
}
