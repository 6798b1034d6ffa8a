//! Earthquake hypocenter lists.
//!
//! Binary layout (big-endian):
//!
//! ```text
//! +----------+--------------------------------------------------+
//! | count    | events                                           |
//! | 4 bytes  | count * 40 bytes                                 |
//! +----------+--------------------------------------------------+
//! ```
//!
//! Each event is five f64 fields: time (J2K seconds), latitude, longitude,
//! depth (km, positive down) and magnitude.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::DecodeError;

/// Encoded size of one hypocenter.
pub const HYPOCENTER_SIZE: usize = 40;

/// One located earthquake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hypocenter {
    pub time: f64,
    pub lat: f64,
    pub lon: f64,
    pub depth: f64,
    pub magnitude: f64,
}

/// An ordered list of hypocenters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HypocenterList {
    events: Vec<Hypocenter>,
}

impl HypocenterList {
    pub fn new(events: Vec<Hypocenter>) -> Self {
        Self { events }
    }

    /// Decodes a hypocenter list from a binary payload.
    pub fn from_binary(mut buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.remaining() < 4 {
            return Err(DecodeError::Truncated {
                context: "hypocenter count",
                needed: 4,
                available: buf.remaining(),
            });
        }
        let count = buf.get_i32();
        if count < 0 {
            return Err(DecodeError::InvalidDimension {
                field: "event count",
                value: count,
            });
        }
        let count = count as usize;
        if buf.remaining() / HYPOCENTER_SIZE < count {
            return Err(DecodeError::Truncated {
                context: "hypocenter events",
                needed: count.saturating_mul(HYPOCENTER_SIZE),
                available: buf.remaining(),
            });
        }
        let mut events = Vec::with_capacity(count);
        for _ in 0..count {
            events.push(Hypocenter {
                time: buf.get_f64(),
                lat: buf.get_f64(),
                lon: buf.get_f64(),
                depth: buf.get_f64(),
                magnitude: buf.get_f64(),
            });
        }
        Ok(Self { events })
    }

    /// Encodes the list into its binary payload form.
    pub fn to_binary(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(4 + self.events.len() * HYPOCENTER_SIZE);
        buf.put_i32(self.events.len() as i32);
        for e in &self.events {
            buf.put_f64(e.time);
            buf.put_f64(e.lat);
            buf.put_f64(e.lon);
            buf.put_f64(e.depth);
            buf.put_f64(e.magnitude);
        }
        buf.to_vec()
    }

    pub fn events(&self) -> &[Hypocenter] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Largest magnitude in the list.
    pub fn max_magnitude(&self) -> Option<f64> {
        self.events
            .iter()
            .map(|e| e.magnitude)
            .fold(None, |acc, m| match acc {
                Some(best) if best >= m => Some(best),
                _ => Some(m),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HypocenterList {
        HypocenterList::new(vec![
            Hypocenter {
                time: 3.0e8,
                lat: 19.41,
                lon: -155.29,
                depth: 2.1,
                magnitude: 1.8,
            },
            Hypocenter {
                time: 3.0e8 + 60.0,
                lat: 19.40,
                lon: -155.28,
                depth: 30.5,
                magnitude: 3.2,
            },
        ])
    }

    #[test]
    fn test_binary_roundtrip() {
        let list = sample();
        let decoded = HypocenterList::from_binary(&list.to_binary()).unwrap();
        assert_eq!(decoded, list);
    }

    #[test]
    fn test_empty_list() {
        let decoded = HypocenterList::from_binary(&0i32.to_be_bytes()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_max_magnitude() {
        assert_eq!(sample().max_magnitude(), Some(3.2));
        assert_eq!(HypocenterList::default().max_magnitude(), None);
    }

    #[test]
    fn test_negative_count() {
        let err = HypocenterList::from_binary(&(-1i32).to_be_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidDimension {
                field: "event count",
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_events() {
        let mut bytes = sample().to_binary();
        bytes.truncate(bytes.len() - HYPOCENTER_SIZE);
        let err = HypocenterList::from_binary(&bytes).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                context: "hypocenter events",
                ..
            }
        ));
    }
}
