//! # vdx-client
//!
//! Async client for VDX servers.
//!
//! A client owns one persistent TCP connection and runs one request at a
//! time: a text command goes out, a status line comes back, then either a
//! zlib-compressed binary payload (decoded through a dataset registry) or a
//! counted block of text lines. Transport and protocol failures are retried
//! with a reconnect between attempts, up to a configurable budget;
//! server-reported errors fail immediately.

pub mod client;
pub mod connection;
pub mod error;
pub mod retry;

pub use client::VdxClient;
pub use connection::{Connection, ConnectionConfig};
pub use error::ClientError;
pub use retry::{RetryDecision, RetrySession, DEFAULT_MAX_TRIES};
