//! Zlib payload codec.
//!
//! Binary payloads travel zlib-compressed on the wire. The byte count in the
//! response envelope refers to the compressed form; decoders always see the
//! inflated bytes.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::ProtocolError;

/// Compresses `data` with zlib at the default level.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(ProtocolError::Compress)?;
    encoder.finish().map_err(ProtocolError::Compress)
}

/// Inflates a zlib-compressed payload.
///
/// The whole stream must be present, trailing checksum included; anything
/// short of the stream-end marker is an error, never a shortened buffer.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len().saturating_mul(4).max(1024));
    loop {
        let consumed = inflater.total_in() as usize;
        let status = inflater
            .decompress_vec(&data[consumed..], &mut out, FlushDecompress::Finish)
            .map_err(|e| {
                ProtocolError::Decompress(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    e,
                ))
            })?;
        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                if out.len() == out.capacity() {
                    // Output space ran out before the input did.
                    out.reserve(out.capacity().max(1024));
                } else {
                    return Err(ProtocolError::Decompress(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "zlib stream ended before its stream-end marker",
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let data = b"tilt data from the summit station".repeat(100);
        let compressed = compress(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_empty_payload() {
        let compressed = compress(b"").unwrap();
        assert_eq!(decompress(&compressed).unwrap(), b"");
    }

    #[test]
    fn test_garbage_fails_to_decompress() {
        let err = decompress(b"this was never compressed").unwrap_err();
        assert!(matches!(err, ProtocolError::Decompress(_)));
    }

    #[test]
    fn test_truncated_stream_fails() {
        let compressed = compress(&[0u8; 4096]).unwrap();
        // Cut inside the header, inside the deflate body, and inside the
        // trailing checksum. Every one must fail, not inflate short.
        for cut in [2, compressed.len() / 2, compressed.len() - 1] {
            let err = decompress(&compressed[..cut]).unwrap_err();
            assert!(matches!(err, ProtocolError::Decompress(_)), "cut={cut}");
        }
    }

    #[test]
    fn test_inflation_larger_than_initial_buffer() {
        // 64 KiB of zeros compresses far below a quarter of its size, so
        // inflation has to outgrow the starting allocation.
        let data = vec![0u8; 65536];
        let compressed = compress(&data).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), data);
    }
}
