//! # vdx-data
//!
//! Typed datasets for VDX binary payloads.
//!
//! A VDX server answers a binary query with a type tag and a blob of
//! big-endian bytes. This crate holds the dataset types those bytes decode
//! into, the decoders themselves, and the [`DataTypeRegistry`] that maps
//! type tags to decoders. It also carries the [`Channel`] metadata value
//! returned by text queries.
//!
//! Decoding is all-or-nothing: a truncated or malformed payload fails the
//! whole decode, never yields a partial dataset. Bytes past the declared
//! content are tolerated.

pub mod channel;
pub mod dataset;
pub mod error;
pub mod hypocenter;
pub mod matrix;
pub mod registry;
pub mod wave;

pub use channel::{Channel, ChannelParseError};
pub use dataset::{
    Dataset, EwRsamData, GpsData, HelicorderData, RsamData, TensorStrainData, TiltData,
};
pub use error::DecodeError;
pub use hypocenter::{Hypocenter, HypocenterList};
pub use matrix::GenericDataMatrix;
pub use registry::DataTypeRegistry;
pub use wave::Wave;
