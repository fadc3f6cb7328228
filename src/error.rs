//! Error types for plantmodel-rs

use std::io;
use thiserror::Error;

/// Main error type for PlantModel parsing operations.
#[derive(Debug, Error)]
pub enum PlantModelError {
    /// Stream ended before a valid `HEAD` identifier could be resynchronised.
    #[error("no HEAD identifier found before end of stream")]
    MissingHeader,

    /// Bytes at the expected identifier position did not match the
    /// 4-ASCII-in-3/4-words shape.
    #[error("bad identifier bytes at offset {offset}")]
    BadIdentifier {
        /// Byte offset into the stream where the scan failed.
        offset: u64,
    },

    /// A well-formed identifier was read, but it is not legal in the
    /// current automaton state.
    #[error("unexpected identifier: expected one of {expected:?}, found {found:?}")]
    UnexpectedIdentifier {
        /// Identifiers that would have been legal here.
        expected: Vec<String>,
        /// Identifier actually read.
        found: String,
    },

    /// Primitive kind outside the 1..=11 range.
    #[error("unknown primitive kind: {0}")]
    UnknownPrimitiveKind(u32),

    /// Stream ended in the middle of a well-defined field.
    #[error("truncated stream: expected {expected} more bytes, got {actual}")]
    Truncated {
        /// Bytes that were expected.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A string payload's declared encoding could not be transcoded.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Result type alias for plantmodel-rs operations.
pub type Result<T> = std::result::Result<T, PlantModelError>;
