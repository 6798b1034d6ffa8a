//! # vdx-device
//!
//! Instrument protocol adapter for field telemetry devices.
//!
//! A device driver implements the [`Device`] trait: it builds outbound
//! command strings, decides when an accumulating response buffer holds one
//! complete message, passes an authoritative verdict on complete messages,
//! and strips framing from accepted ones. The acquisition mode - streaming
//! or polling - governs all of those rules.
//!
//! Session options arrive as a string key/value map and are validated once
//! into an immutable [`DeviceConfig`]; an invalid configuration never
//! produces a device. [`MessageCycle`] owns the response buffer for one
//! request cycle and walks it through idle, awaiting, and settled states.
//!
//! The concrete driver here is [`AgLily`], for the LILY self-leveling
//! tiltmeter.

pub mod config;
pub mod cycle;
pub mod device;
pub mod error;
pub mod lily;
pub mod timefmt;

pub use config::{Acquisition, DeviceConfig};
pub use cycle::{CycleState, MessageCycle};
pub use device::{DataRequest, Device};
pub use error::{ConfigError, FramingError};
pub use lily::AgLily;
