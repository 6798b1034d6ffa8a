//! Dataset decode errors.

use thiserror::Error;

/// Errors produced while decoding a binary dataset payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No decoder is registered for the response's type tag.
    #[error("unknown data type: {0:?}")]
    UnknownType(String),

    /// The payload ended before the declared content.
    #[error("payload truncated reading {context}: need {needed} bytes, have {available}")]
    Truncated {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    /// A count or dimension field is negative.
    #[error("invalid {field}: {value}")]
    InvalidDimension { field: &'static str, value: i32 },

    /// A matrix value buffer does not match its declared dimensions.
    #[error("matrix shape {rows}x{cols} does not fit {len} values")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        len: usize,
    },

    /// A typed view requires more columns than the matrix carries.
    #[error("{kind} data requires at least {required} columns, matrix has {actual}")]
    ColumnMismatch {
        kind: &'static str,
        required: usize,
        actual: usize,
    },
}
