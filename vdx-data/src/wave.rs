//! Seismic waveform data.
//!
//! Binary layout (big-endian):
//!
//! ```text
//! +------------+---------------+---------------------+----------+------------------+
//! | start time | sampling rate | registration offset | count    | samples          |
//! | 8 bytes    | 8 bytes       | 8 bytes             | 4 bytes  | count * 4 bytes  |
//! +------------+---------------+---------------------+----------+------------------+
//! ```

use bytes::{Buf, BufMut, BytesMut};

use crate::error::DecodeError;

/// Wave header size in bytes: three f64 fields plus the i32 sample count.
pub const WAVE_HEADER_SIZE: usize = 28;

/// Sentinel sample value marking a gap in the recording.
pub const NO_DATA: i32 = i32::MIN;

/// A regularly sampled waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    /// Time of the first sample, in J2K seconds.
    pub start_time: f64,
    /// Samples per second.
    pub sampling_rate: f64,
    /// Registration offset applied upstream, in seconds.
    pub registration_offset: f64,
    samples: Vec<i32>,
}

impl Wave {
    /// Creates a wave from raw samples.
    pub fn new(start_time: f64, sampling_rate: f64, samples: Vec<i32>) -> Self {
        Self {
            start_time,
            sampling_rate,
            registration_offset: 0.0,
            samples,
        }
    }

    /// Decodes a wave from a binary payload.
    pub fn from_binary(mut buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.remaining() < WAVE_HEADER_SIZE {
            return Err(DecodeError::Truncated {
                context: "wave header",
                needed: WAVE_HEADER_SIZE,
                available: buf.remaining(),
            });
        }
        let start_time = buf.get_f64();
        let sampling_rate = buf.get_f64();
        let registration_offset = buf.get_f64();
        let count = buf.get_i32();
        if count < 0 {
            return Err(DecodeError::InvalidDimension {
                field: "sample count",
                value: count,
            });
        }
        let count = count as usize;
        if buf.remaining() / 4 < count {
            return Err(DecodeError::Truncated {
                context: "wave samples",
                needed: count.saturating_mul(4),
                available: buf.remaining(),
            });
        }
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            samples.push(buf.get_i32());
        }
        Ok(Self {
            start_time,
            sampling_rate,
            registration_offset,
            samples,
        })
    }

    /// Encodes the wave into its binary payload form.
    pub fn to_binary(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(WAVE_HEADER_SIZE + self.samples.len() * 4);
        buf.put_f64(self.start_time);
        buf.put_f64(self.sampling_rate);
        buf.put_f64(self.registration_offset);
        buf.put_i32(self.samples.len() as i32);
        for s in &self.samples {
            buf.put_i32(*s);
        }
        buf.to_vec()
    }

    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time one past the last sample, in J2K seconds.
    pub fn end_time(&self) -> f64 {
        self.start_time + self.samples.len() as f64 / self.sampling_rate
    }

    /// Smallest sample, ignoring gap sentinels.
    pub fn min(&self) -> Option<i32> {
        self.samples.iter().copied().filter(|s| *s != NO_DATA).min()
    }

    /// Largest sample, ignoring gap sentinels.
    pub fn max(&self) -> Option<i32> {
        self.samples.iter().copied().filter(|s| *s != NO_DATA).max()
    }
}
