//! Driver for the Applied Geomechanics LILY borehole tiltmeter.
//!
//! The LILY speaks a line protocol addressed with a `*9900` prefix. In
//! stream mode it pushes one `$`-prefixed data line at a time:
//!
//! ```text
//! $XY,2026/03/15 12:34:56,-12.345,34.567,22.33,44.11\r\n
//! ```
//!
//! In poll mode a download command is echoed back, followed by the data
//! lines and a terminator:
//!
//! ```text
//! *9900XY-DL-LAST,30\r\n
//! $<line>\r\n
//! ...
//! $end download\r\n
//! ```

use chrono::{DateTime, Utc};

use crate::config::{Acquisition, DeviceConfig};
use crate::device::{DataRequest, Device};
use crate::error::{ConfigError, FramingError};

/// Command prefix every framed LILY command carries.
const ADDRESS: &str = "*9900";

/// Shortest well-formed message or line, in bytes.
const MIN_MESSAGE_LENGTH: usize = 40;

/// Terminator of a poll download.
const POLL_END: &str = "$end download\r\n";

/// LILY tiltmeter protocol adapter.
pub struct AgLily {
    config: DeviceConfig,
}

impl AgLily {
    pub fn new(config: DeviceConfig) -> Self {
        Self { config }
    }

    /// Builds the driver straight from a parameter map.
    pub fn from_params(
        params: &std::collections::HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(DeviceConfig::from_params(params)?))
    }

    fn validate_with(&self, message: &str, start: char, end: &str) -> Result<(), FramingError> {
        if message.len() < MIN_MESSAGE_LENGTH {
            return Err(FramingError::TooShort {
                length: message.len(),
            });
        }
        let first = message.chars().next().unwrap_or('\0');
        if first != start {
            return Err(FramingError::WrongStart { found: first });
        }
        let tail = message.get(message.len() - end.len()..).unwrap_or("");
        if tail != end {
            return Err(FramingError::WrongEnd {
                found: tail.to_string(),
            });
        }
        Ok(())
    }
}

impl Device for AgLily {
    fn config(&self) -> &DeviceConfig {
        &self.config
    }

    fn request_data(
        &self,
        last_sample: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Option<DataRequest> {
        if self.config.acquisition == Acquisition::Stream {
            return None;
        }
        let secs = (now - last_sample).num_seconds();
        let samples = secs / i64::from(self.config.sample_rate);
        let lines = samples.min(i64::from(self.config.max_lines));
        if lines <= 0 {
            tracing::debug!(
                "Station {}: no samples due after {}s, skipping poll",
                self.config.station_id,
                secs
            );
            return None;
        }
        Some(DataRequest {
            command: self.make(&format!("XY-DL-LAST,{}", lines)),
            lines: lines as u32,
        })
    }

    fn message_completed(&self, buffer: &str) -> bool {
        self.validate_message(buffer).is_ok()
    }

    fn validate_message(&self, message: &str) -> Result<(), FramingError> {
        match self.config.acquisition {
            Acquisition::Stream => self.validate_with(message, '$', "\r\n"),
            Acquisition::Poll => self.validate_with(message, '*', POLL_END),
        }
    }

    fn validate_line(&self, line: &str) -> Result<(), FramingError> {
        self.validate_with(line, '$', "\r")
    }

    fn format_message<'a>(&self, message: &'a str) -> &'a str {
        match self.config.acquisition {
            Acquisition::Stream => message,
            // Drop the echoed command line, then the terminator and the
            // newline before it.
            Acquisition::Poll => {
                let start = message.find('\n').map(|i| i + 1).unwrap_or(0);
                let end = message.len().saturating_sub(POLL_END.len() + 1);
                message.get(start..end.max(start)).unwrap_or("")
            }
        }
    }

    fn format_line<'a>(&self, line: &'a str) -> &'a str {
        let end = line.len().saturating_sub(1);
        line.get(1..end.max(1)).unwrap_or("").trim()
    }

    fn make(&self, fragment: &str) -> String {
        if fragment.is_empty() {
            return String::new();
        }
        format!("{}{}\r\n", ADDRESS, fragment)
    }

    fn set_time(&self, now: DateTime<Utc>) -> String {
        self.make(&format!("SET-TIME,{}", self.config.format_timestamp(now)))
    }
}
