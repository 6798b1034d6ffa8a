//! Device error types.

use thiserror::Error;

/// Errors from validating a device configuration.
///
/// These are fatal at construction: no device value exists until the
/// configuration is valid.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("fields not defined")]
    MissingFields,

    #[error("acquisition mode not defined")]
    MissingAcquisition,

    #[error("invalid acquisition type: {0:?}")]
    InvalidAcquisition(String),

    #[error("invalid number for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("invalid boolean for {key}: {value:?}")]
    InvalidBool { key: &'static str, value: String },

    #[error("sample rate must be at least 1 second")]
    ZeroSampleRate,

    #[error("unsupported token {token:?} in timestamp mask {mask:?}")]
    BadTimestampMask { mask: String, token: String },

    #[error("unsupported timezone: {0:?}")]
    BadTimezone(String),
}

/// Rejection reasons for an inbound message or data line.
#[derive(Debug, Error, PartialEq)]
pub enum FramingError {
    #[error("message too short: {length} characters")]
    TooShort { length: usize },

    #[error("wrong start character: {found:?}")]
    WrongStart { found: char },

    #[error("wrong ending: {found:?}")]
    WrongEnd { found: String },
}
