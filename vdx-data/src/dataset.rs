//! Decoded dataset types and their type tags.
//!
//! Most time-series types share the generic matrix layout and differ only
//! in what their columns mean, so they wrap [`GenericDataMatrix`] and check
//! the column shape at decode time. Column 0 is always time in J2K seconds.

use crate::error::DecodeError;
use crate::hypocenter::HypocenterList;
use crate::matrix::GenericDataMatrix;
use crate::wave::Wave;

/// Built-in type tags understood by the default registry.
pub mod tag {
    pub const WAVE: &str = "wave";
    pub const HELICORDER: &str = "helicorder";
    pub const GPS: &str = "gps";
    pub const HYPOCENTERS: &str = "hypocenters";
    pub const RSAM: &str = "rsam";
    pub const EWRSAM: &str = "ewrsam";
    pub const TILT: &str = "tilt";
    pub const TENSORSTRAIN: &str = "tensorstrain";
    pub const GENERIC_FIXED: &str = "genericfixed";
    pub const GENERIC_VARIABLE: &str = "genericvariable";
}

fn check_columns(
    kind: &'static str,
    required: usize,
    matrix: &GenericDataMatrix,
) -> Result<(), DecodeError> {
    if matrix.cols() < required {
        return Err(DecodeError::ColumnMismatch {
            kind,
            required,
            actual: matrix.cols(),
        });
    }
    Ok(())
}

/// Helicorder display data: per-bar time, minimum and maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct HelicorderData {
    matrix: GenericDataMatrix,
}

impl HelicorderData {
    pub const MIN_COLUMNS: usize = 3;

    pub fn from_matrix(matrix: GenericDataMatrix) -> Result<Self, DecodeError> {
        check_columns("helicorder", Self::MIN_COLUMNS, &matrix)?;
        Ok(Self { matrix })
    }

    pub fn from_binary(buf: &[u8]) -> Result<Self, DecodeError> {
        Self::from_matrix(GenericDataMatrix::from_binary(buf)?)
    }

    pub fn matrix(&self) -> &GenericDataMatrix {
        &self.matrix
    }

    pub fn times(&self) -> Vec<f64> {
        self.matrix.column(0).unwrap_or_default()
    }

    pub fn min_values(&self) -> Vec<f64> {
        self.matrix.column(1).unwrap_or_default()
    }

    pub fn max_values(&self) -> Vec<f64> {
        self.matrix.column(2).unwrap_or_default()
    }
}

/// GPS solution series: time plus XYZ position columns.
#[derive(Debug, Clone, PartialEq)]
pub struct GpsData {
    matrix: GenericDataMatrix,
}

impl GpsData {
    pub const MIN_COLUMNS: usize = 4;

    pub fn from_matrix(matrix: GenericDataMatrix) -> Result<Self, DecodeError> {
        check_columns("gps", Self::MIN_COLUMNS, &matrix)?;
        Ok(Self { matrix })
    }

    pub fn from_binary(buf: &[u8]) -> Result<Self, DecodeError> {
        Self::from_matrix(GenericDataMatrix::from_binary(buf)?)
    }

    pub fn matrix(&self) -> &GenericDataMatrix {
        &self.matrix
    }

    pub fn times(&self) -> Vec<f64> {
        self.matrix.column(0).unwrap_or_default()
    }

    pub fn x(&self) -> Vec<f64> {
        self.matrix.column(1).unwrap_or_default()
    }

    pub fn y(&self) -> Vec<f64> {
        self.matrix.column(2).unwrap_or_default()
    }

    pub fn z(&self) -> Vec<f64> {
        self.matrix.column(3).unwrap_or_default()
    }
}

/// RSAM series: time and amplitude.
#[derive(Debug, Clone, PartialEq)]
pub struct RsamData {
    matrix: GenericDataMatrix,
}

impl RsamData {
    pub const MIN_COLUMNS: usize = 2;

    pub fn from_matrix(matrix: GenericDataMatrix) -> Result<Self, DecodeError> {
        check_columns("rsam", Self::MIN_COLUMNS, &matrix)?;
        Ok(Self { matrix })
    }

    pub fn from_binary(buf: &[u8]) -> Result<Self, DecodeError> {
        Self::from_matrix(GenericDataMatrix::from_binary(buf)?)
    }

    pub fn matrix(&self) -> &GenericDataMatrix {
        &self.matrix
    }

    pub fn times(&self) -> Vec<f64> {
        self.matrix.column(0).unwrap_or_default()
    }

    pub fn values(&self) -> Vec<f64> {
        self.matrix.column(1).unwrap_or_default()
    }
}

/// Earthworm-derived RSAM series: time and amplitude.
#[derive(Debug, Clone, PartialEq)]
pub struct EwRsamData {
    matrix: GenericDataMatrix,
}

impl EwRsamData {
    pub const MIN_COLUMNS: usize = 2;

    pub fn from_matrix(matrix: GenericDataMatrix) -> Result<Self, DecodeError> {
        check_columns("ewrsam", Self::MIN_COLUMNS, &matrix)?;
        Ok(Self { matrix })
    }

    pub fn from_binary(buf: &[u8]) -> Result<Self, DecodeError> {
        Self::from_matrix(GenericDataMatrix::from_binary(buf)?)
    }

    pub fn matrix(&self) -> &GenericDataMatrix {
        &self.matrix
    }

    pub fn times(&self) -> Vec<f64> {
        self.matrix.column(0).unwrap_or_default()
    }

    pub fn values(&self) -> Vec<f64> {
        self.matrix.column(1).unwrap_or_default()
    }
}

/// Tilt series: time, east and north components, then any environmental
/// columns the source records.
#[derive(Debug, Clone, PartialEq)]
pub struct TiltData {
    matrix: GenericDataMatrix,
}

impl TiltData {
    pub const MIN_COLUMNS: usize = 3;

    pub fn from_matrix(matrix: GenericDataMatrix) -> Result<Self, DecodeError> {
        check_columns("tilt", Self::MIN_COLUMNS, &matrix)?;
        Ok(Self { matrix })
    }

    pub fn from_binary(buf: &[u8]) -> Result<Self, DecodeError> {
        Self::from_matrix(GenericDataMatrix::from_binary(buf)?)
    }

    pub fn matrix(&self) -> &GenericDataMatrix {
        &self.matrix
    }

    pub fn times(&self) -> Vec<f64> {
        self.matrix.column(0).unwrap_or_default()
    }

    pub fn east(&self) -> Vec<f64> {
        self.matrix.column(1).unwrap_or_default()
    }

    pub fn north(&self) -> Vec<f64> {
        self.matrix.column(2).unwrap_or_default()
    }
}

/// Tensor strainmeter series: time plus one column per gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorStrainData {
    matrix: GenericDataMatrix,
}

impl TensorStrainData {
    pub const MIN_COLUMNS: usize = 2;

    pub fn from_matrix(matrix: GenericDataMatrix) -> Result<Self, DecodeError> {
        check_columns("tensorstrain", Self::MIN_COLUMNS, &matrix)?;
        Ok(Self { matrix })
    }

    pub fn from_binary(buf: &[u8]) -> Result<Self, DecodeError> {
        Self::from_matrix(GenericDataMatrix::from_binary(buf)?)
    }

    pub fn matrix(&self) -> &GenericDataMatrix {
        &self.matrix
    }

    pub fn times(&self) -> Vec<f64> {
        self.matrix.column(0).unwrap_or_default()
    }
}

/// A decoded binary dataset, one variant per built-in type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Wave(Wave),
    Helicorder(HelicorderData),
    Gps(GpsData),
    Hypocenters(HypocenterList),
    Rsam(RsamData),
    EwRsam(EwRsamData),
    Tilt(TiltData),
    TensorStrain(TensorStrainData),
    GenericFixed(GenericDataMatrix),
    GenericVariable(GenericDataMatrix),
}

impl Dataset {
    /// The type tag this dataset decodes from.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Dataset::Wave(_) => tag::WAVE,
            Dataset::Helicorder(_) => tag::HELICORDER,
            Dataset::Gps(_) => tag::GPS,
            Dataset::Hypocenters(_) => tag::HYPOCENTERS,
            Dataset::Rsam(_) => tag::RSAM,
            Dataset::EwRsam(_) => tag::EWRSAM,
            Dataset::Tilt(_) => tag::TILT,
            Dataset::TensorStrain(_) => tag::TENSORSTRAIN,
            Dataset::GenericFixed(_) => tag::GENERIC_FIXED,
            Dataset::GenericVariable(_) => tag::GENERIC_VARIABLE,
        }
    }

    /// Number of rows (samples or events) in the dataset.
    pub fn len(&self) -> usize {
        match self {
            Dataset::Wave(w) => w.len(),
            Dataset::Helicorder(d) => d.matrix().rows(),
            Dataset::Gps(d) => d.matrix().rows(),
            Dataset::Rsam(d) => d.matrix().rows(),
            Dataset::EwRsam(d) => d.matrix().rows(),
            Dataset::Tilt(d) => d.matrix().rows(),
            Dataset::TensorStrain(d) => d.matrix().rows(),
            Dataset::Hypocenters(l) => l.len(),
            Dataset::GenericFixed(m) | Dataset::GenericVariable(m) => m.rows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
