//! Response assembly for one request/response exchange.
//!
//! Bytes arrive from the link in arbitrary chunks. A `MessageCycle`
//! accumulates them until the device recognizes a complete message, then
//! validates the framing once:
//!
//! ```text
//!          start()          complete          valid
//!   Idle ----------> AwaitingResponse ----> Complete
//!                          |                    ^
//!                          | finish()           | valid
//!                          v                    |
//!                       (validate) ------------>+---> Invalid
//! ```
//!
//! `finish` forces validation of whatever has arrived, for the caller's
//! timeout path. `Complete` and `Invalid` hold until `start` or `reset`.

use crate::device::Device;
use crate::error::FramingError;

/// Where one exchange stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    /// No exchange in progress.
    Idle,
    /// Request sent, response incomplete.
    AwaitingResponse,
    /// A well-framed response is buffered.
    Complete,
    /// The response failed validation.
    Invalid,
}

/// Accumulates one response and tracks its state.
pub struct MessageCycle<'a> {
    device: &'a dyn Device,
    buffer: String,
    state: CycleState,
    fault: Option<FramingError>,
}

impl<'a> MessageCycle<'a> {
    pub fn new(device: &'a dyn Device) -> Self {
        Self {
            device,
            buffer: String::new(),
            state: CycleState::Idle,
            fault: None,
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// The framing fault, once the cycle is `Invalid`.
    pub fn fault(&self) -> Option<&FramingError> {
        self.fault.as_ref()
    }

    /// The buffered response exactly as received.
    pub fn raw(&self) -> &str {
        &self.buffer
    }

    /// Begins a new exchange, discarding any previous response.
    pub fn start(&mut self) {
        self.buffer.clear();
        self.fault = None;
        self.state = CycleState::AwaitingResponse;
    }

    /// Appends received bytes and returns the resulting state.
    ///
    /// Chunks pushed outside `AwaitingResponse` are dropped.
    pub fn push(&mut self, chunk: &str) -> CycleState {
        if self.state != CycleState::AwaitingResponse {
            return self.state;
        }
        self.buffer.push_str(chunk);
        if self.device.message_completed(&self.buffer) {
            self.validate();
        }
        self.state
    }

    /// Forces validation of whatever has arrived so far.
    ///
    /// Call on timeout; a stalled partial response becomes `Invalid` with
    /// the framing fault explaining what is missing.
    pub fn finish(&mut self) -> CycleState {
        if self.state == CycleState::AwaitingResponse {
            self.validate();
        }
        self.state
    }

    /// Returns to `Idle`, discarding the buffer.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.fault = None;
        self.state = CycleState::Idle;
    }

    /// The response body with framing stripped, once `Complete`.
    pub fn payload(&self) -> Option<&str> {
        match self.state {
            CycleState::Complete => Some(self.device.format_message(&self.buffer)),
            _ => None,
        }
    }

    /// The validated data lines of the payload, framing stripped.
    ///
    /// Lines that fail validation are logged and skipped rather than
    /// failing the whole response.
    pub fn payload_lines(&self) -> Vec<&str> {
        let Some(payload) = self.payload() else {
            return Vec::new();
        };
        payload
            .split('\n')
            .filter(|line| !line.is_empty())
            .filter(|line| match self.device.validate_line(line) {
                Ok(()) => true,
                Err(err) => {
                    tracing::debug!("Skipping malformed line {:?}: {}", line, err);
                    false
                }
            })
            .map(|line| self.device.format_line(line))
            .collect()
    }

    fn validate(&mut self) {
        match self.device.validate_message(&self.buffer) {
            Ok(()) => self.state = CycleState::Complete,
            Err(err) => {
                self.fault = Some(err);
                self.state = CycleState::Invalid;
            }
        }
    }
}
