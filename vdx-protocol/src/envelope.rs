//! Response status lines and their parsed field sets.
//!
//! Every reply from a VDX server starts with a single text line of the form
//! `<status>:<remainder>`. An `ok` remainder carries `key=value` pairs that
//! describe the payload that follows; an `error` remainder is a free-form
//! message intended for the caller verbatim.

use crate::command::Command;
use crate::error::ProtocolError;

/// Status token for a successful response.
pub const STATUS_OK: &str = "ok";

/// Status token for a server-reported failure.
pub const STATUS_ERROR: &str = "error";

/// Parsed form of a server response status line.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope {
    /// The request succeeded; fields describe the payload that follows.
    Ok(OkFields),
    /// The server rejected the request with a message.
    Error(String),
}

impl ResponseEnvelope {
    /// Parses a status line (without the trailing newline).
    ///
    /// Lines missing the `status:` separator are malformed; any status other
    /// than `ok` or `error` is unknown.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let (status, remainder) = line.split_once(':').ok_or_else(|| {
            ProtocolError::MalformedResponse {
                line: line.to_string(),
            }
        })?;
        match status {
            STATUS_OK => Ok(Self::Ok(OkFields {
                fields: Command::parse(remainder.trim()),
            })),
            STATUS_ERROR => Ok(Self::Error(remainder.to_string())),
            other => Err(ProtocolError::UnknownStatus(other.to_string())),
        }
    }
}

/// Field set carried by an `ok` response line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OkFields {
    fields: Command,
}

impl OkFields {
    /// Returns the raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key)
    }

    /// Number of bytes in the binary payload that follows the status line.
    pub fn byte_count(&self) -> Result<usize, ProtocolError> {
        self.required_usize("bytes")
    }

    /// Number of text lines that follow the status line.
    pub fn line_count(&self) -> Result<usize, ProtocolError> {
        self.required_usize("lines")
    }

    /// Dataset type tag naming the decoder for the binary payload.
    pub fn type_tag(&self) -> Result<&str, ProtocolError> {
        self.get("type").ok_or(ProtocolError::MissingField("type"))
    }

    fn required_usize(&self, key: &'static str) -> Result<usize, ProtocolError> {
        let value = self.get(key).ok_or(ProtocolError::MissingField(key))?;
        value.parse().map_err(|_| ProtocolError::InvalidField {
            key,
            value: value.to_string(),
        })
    }
}
