//! # vdx-protocol
//!
//! Wire protocol for VDX geophysical time-series servers.
//!
//! This crate provides:
//! - Command parameter maps with deterministic `key=value;...` serialization
//! - Response envelope parsing (`ok:`/`error:` status lines)
//! - The zlib whole-payload codec used for binary responses
//!
//! The protocol is line-oriented text: a client writes one `getdata:`
//! request line and reads one status line back, optionally followed by a
//! binary payload of a declared byte count or a declared number of text
//! lines.

pub mod command;
pub mod envelope;
pub mod error;
pub mod payload;

pub use command::{Command, GETDATA_PREFIX, PAIR_SEPARATOR};
pub use envelope::{OkFields, ResponseEnvelope};
pub use error::ProtocolError;
pub use payload::{compress, decompress};

/// Default port for VDX servers.
pub const DEFAULT_PORT: u16 = 16050;
