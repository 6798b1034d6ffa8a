//! Client error types.

use thiserror::Error;
use vdx_data::DecodeError;
use vdx_protocol::ProtocolError;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("not connected")]
    NotConnected,

    #[error("connection closed")]
    ConnectionClosed,

    #[error("request timeout")]
    Timeout,

    #[error("server error: {message}")]
    Server { message: String },

    #[error("retries exhausted after {attempts} attempts: {source}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Returns whether a reconnect-and-retry may fix this error.
    ///
    /// Transport failures and malformed or undecodable responses are worth
    /// another attempt; an error the server reported is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Io(_) => true,
            ClientError::Protocol(_) => true,
            ClientError::Decode(_) => true,
            ClientError::NotConnected => true,
            ClientError::ConnectionClosed => true,
            ClientError::Timeout => true,
            ClientError::Server { .. } => false,
            ClientError::RetryExhausted { .. } => false,
        }
    }
}
