//! Generic data matrix - the numeric table backing most dataset types.
//!
//! Binary layout (big-endian):
//!
//! ```text
//! +----------+----------+------------------------------+
//! | rows     | cols     | values                       |
//! | 4 bytes  | 4 bytes  | rows * cols f64, row-major   |
//! +----------+----------+------------------------------+
//! ```
//!
//! Column 0 is the time column (J2K seconds) for every time-series type
//! built on top of this matrix.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::DecodeError;

/// Matrix header size in bytes: two i32 dimensions.
pub const MATRIX_HEADER_SIZE: usize = 8;

/// A row-major matrix of f64 values with named dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericDataMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl GenericDataMatrix {
    /// Creates a matrix from row-major values.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, DecodeError> {
        if rows * cols != values.len() {
            return Err(DecodeError::ShapeMismatch {
                rows,
                cols,
                len: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    /// Decodes a matrix from a binary payload.
    pub fn from_binary(mut buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.remaining() < MATRIX_HEADER_SIZE {
            return Err(DecodeError::Truncated {
                context: "matrix header",
                needed: MATRIX_HEADER_SIZE,
                available: buf.remaining(),
            });
        }
        let rows = buf.get_i32();
        let cols = buf.get_i32();
        if rows < 0 {
            return Err(DecodeError::InvalidDimension {
                field: "rows",
                value: rows,
            });
        }
        if cols < 0 {
            return Err(DecodeError::InvalidDimension {
                field: "cols",
                value: cols,
            });
        }
        let rows = rows as usize;
        let cols = cols as usize;
        let cells = rows * cols;
        if buf.remaining() / 8 < cells {
            return Err(DecodeError::Truncated {
                context: "matrix values",
                needed: cells.saturating_mul(8),
                available: buf.remaining(),
            });
        }
        let mut values = Vec::with_capacity(cells);
        for _ in 0..cells {
            values.push(buf.get_f64());
        }
        Ok(Self { rows, cols, values })
    }

    /// Encodes the matrix into its binary payload form.
    pub fn to_binary(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(MATRIX_HEADER_SIZE + self.values.len() * 8);
        buf.put_i32(self.rows as i32);
        buf.put_i32(self.cols as i32);
        for v in &self.values {
            buf.put_f64(*v);
        }
        buf.to_vec()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.values[row * self.cols + col])
        } else {
            None
        }
    }

    /// Returns one row as a slice, if in bounds.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.values[start..start + self.cols])
        } else {
            None
        }
    }

    /// Collects one column into a vector, if in bounds.
    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        if col < self.cols {
            Some(
                (0..self.rows)
                    .map(|r| self.values[r * self.cols + col])
                    .collect(),
            )
        } else {
            None
        }
    }

    /// All values, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
