//! The instrument protocol trait.
//!
//! A `Device` knows the wire dialect of one instrument family: how to frame
//! and validate its messages, how to ask it for data, and how to set its
//! clock. Everything a driver does with bytes that is specific to the
//! instrument lives behind this trait; the acquisition loop stays generic.

use chrono::{DateTime, Utc};

use crate::config::DeviceConfig;
use crate::error::FramingError;

/// A command to send and the number of data lines it should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRequest {
    /// Fully framed command, ready to write.
    pub command: String,
    /// Lines of data the command asks for.
    pub lines: u32,
}

/// Protocol adapter for one instrument family.
///
/// Implementations are pure with respect to I/O: they inspect and produce
/// strings, and the caller owns the link. That keeps every method testable
/// without hardware.
pub trait Device: Send + Sync {
    /// The session configuration this device was built with.
    fn config(&self) -> &DeviceConfig;

    /// Builds the next data request, or `None` when there is nothing to ask.
    ///
    /// `last_sample` is the time of the newest sample already stored and
    /// `now` is the current time. Streaming devices never request; polled
    /// devices request the span between the two, capped at the configured
    /// line limit.
    fn request_data(&self, last_sample: DateTime<Utc>, now: DateTime<Utc>)
        -> Option<DataRequest>;

    /// Whether `buffer` holds a complete response.
    fn message_completed(&self, buffer: &str) -> bool;

    /// Checks a complete response for correct framing.
    fn validate_message(&self, message: &str) -> Result<(), FramingError>;

    /// Checks one data line for correct framing.
    fn validate_line(&self, line: &str) -> Result<(), FramingError>;

    /// Strips framing from a validated response, leaving the data body.
    fn format_message<'a>(&self, message: &'a str) -> &'a str;

    /// Strips framing from a validated data line.
    fn format_line<'a>(&self, line: &'a str) -> &'a str;

    /// Frames a command fragment for the wire. Empty fragments stay empty.
    fn make(&self, fragment: &str) -> String;

    /// Builds the command that sets the device clock to `now`.
    fn set_time(&self, now: DateTime<Utc>) -> String;
}
