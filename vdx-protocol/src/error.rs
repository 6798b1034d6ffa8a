//! Protocol error types.

use thiserror::Error;

/// Errors raised while parsing wire text or transforming payloads.
///
/// Every variant here is terminal for the attempt that produced it; whether
/// the surrounding operation is retried is the session engine's decision,
/// not this crate's.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The response line was empty or carried no `:` status separator.
    #[error("malformed response line: {line:?}")]
    MalformedResponse { line: String },

    /// The status token was neither `ok` nor `error`.
    #[error("unknown response status: {0:?}")]
    UnknownStatus(String),

    /// An `ok` remainder lacked a field the operation requires.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field was present but its value did not parse.
    #[error("invalid value for {key}: {value:?}")]
    InvalidField { key: &'static str, value: String },

    /// The compressed payload did not inflate.
    #[error("zlib decompression failed")]
    Decompress(#[source] std::io::Error),

    /// The payload did not deflate.
    #[error("zlib compression failed")]
    Compress(#[source] std::io::Error),
}
