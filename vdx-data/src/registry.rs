//! Type tag to decoder dispatch.
//!
//! The registry maps response type tags to decoder functions. Clients share
//! one registry behind an `Arc` and may extend it with site-specific types.
//! Registration is expected at startup, before queries run; a tag registered
//! twice keeps the later decoder.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::dataset::{
    tag, Dataset, EwRsamData, GpsData, HelicorderData, RsamData, TensorStrainData, TiltData,
};
use crate::error::DecodeError;
use crate::hypocenter::HypocenterList;
use crate::matrix::GenericDataMatrix;
use crate::wave::Wave;

/// Decoder function: inflated payload bytes to a dataset.
pub type Decoder = dyn Fn(&[u8]) -> Result<Dataset, DecodeError> + Send + Sync;

/// Registry of dataset decoders keyed by type tag.
pub struct DataTypeRegistry {
    decoders: RwLock<HashMap<String, Arc<Decoder>>>,
}

impl DataTypeRegistry {
    /// Creates an empty registry with no decoders.
    pub fn new() -> Self {
        Self {
            decoders: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry seeded with the ten built-in type tags.
    pub fn with_builtin_types() -> Self {
        let registry = Self::new();
        registry.register(tag::WAVE, |b| Wave::from_binary(b).map(Dataset::Wave));
        registry.register(tag::HELICORDER, |b| {
            HelicorderData::from_binary(b).map(Dataset::Helicorder)
        });
        registry.register(tag::GPS, |b| GpsData::from_binary(b).map(Dataset::Gps));
        registry.register(tag::HYPOCENTERS, |b| {
            HypocenterList::from_binary(b).map(Dataset::Hypocenters)
        });
        registry.register(tag::RSAM, |b| RsamData::from_binary(b).map(Dataset::Rsam));
        registry.register(tag::EWRSAM, |b| {
            EwRsamData::from_binary(b).map(Dataset::EwRsam)
        });
        registry.register(tag::TILT, |b| TiltData::from_binary(b).map(Dataset::Tilt));
        registry.register(tag::TENSORSTRAIN, |b| {
            TensorStrainData::from_binary(b).map(Dataset::TensorStrain)
        });
        registry.register(tag::GENERIC_FIXED, |b| {
            GenericDataMatrix::from_binary(b).map(Dataset::GenericFixed)
        });
        registry.register(tag::GENERIC_VARIABLE, |b| {
            GenericDataMatrix::from_binary(b).map(Dataset::GenericVariable)
        });
        registry
    }

    /// Registers a decoder for a type tag. Last write wins.
    pub fn register<F>(&self, tag: impl Into<String>, decoder: F)
    where
        F: Fn(&[u8]) -> Result<Dataset, DecodeError> + Send + Sync + 'static,
    {
        self.decoders.write().insert(tag.into(), Arc::new(decoder));
    }

    /// Decodes a payload through the decoder registered for `tag`.
    pub fn decode(&self, tag: &str, payload: &[u8]) -> Result<Dataset, DecodeError> {
        let decoder = self
            .decoders
            .read()
            .get(tag)
            .cloned()
            .ok_or_else(|| DecodeError::UnknownType(tag.to_string()))?;
        decoder(payload)
    }

    /// True if a decoder is registered for `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.decoders.read().contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.decoders.read().keys().cloned().collect();
        tags.sort();
        tags
    }
}

impl Default for DataTypeRegistry {
    fn default() -> Self {
        Self::with_builtin_types()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tags_present() {
        let registry = DataTypeRegistry::with_builtin_types();
        for tag in [
            "wave",
            "helicorder",
            "gps",
            "hypocenters",
            "rsam",
            "ewrsam",
            "tilt",
            "tensorstrain",
            "genericfixed",
            "genericvariable",
        ] {
            assert!(registry.contains(tag), "missing builtin tag {tag}");
        }
        assert_eq!(registry.tags().len(), 10);
    }

    #[test]
    fn test_decode_wave() {
        let registry = DataTypeRegistry::with_builtin_types();
        let bytes = Wave::new(100.0, 50.0, vec![1, 2, 3]).to_binary();
        let dataset = registry.decode("wave", &bytes).unwrap();
        match dataset {
            Dataset::Wave(w) => assert_eq!(w.samples(), &[1, 2, 3]),
            other => panic!("expected wave, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag_is_distinguishable() {
        let registry = DataTypeRegistry::with_builtin_types();
        let err = registry.decode("infrasound", &[]).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownType(t) if t == "infrasound"));
    }

    #[test]
    fn test_empty_registry_knows_nothing() {
        let registry = DataTypeRegistry::new();
        assert!(!registry.contains("wave"));
        assert!(registry.tags().is_empty());
    }

    #[test]
    fn test_register_custom_type() {
        let registry = DataTypeRegistry::with_builtin_types();
        registry.register("infrasound", |b| {
            GenericDataMatrix::from_binary(b).map(Dataset::GenericVariable)
        });
        let bytes = GenericDataMatrix::new(1, 2, vec![0.0, 7.0]).unwrap().to_binary();
        assert!(registry.decode("infrasound", &bytes).is_ok());
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = DataTypeRegistry::new();
        registry.register("t", |b| GenericDataMatrix::from_binary(b).map(Dataset::GenericFixed));
        registry.register("t", |b| {
            GenericDataMatrix::from_binary(b).map(Dataset::GenericVariable)
        });
        let bytes = GenericDataMatrix::new(0, 0, vec![]).unwrap().to_binary();
        let dataset = registry.decode("t", &bytes).unwrap();
        assert!(matches!(dataset, Dataset::GenericVariable(_)));
    }

    #[test]
    fn test_decode_failure_propagates() {
        let registry = DataTypeRegistry::with_builtin_types();
        let err = registry.decode("wave", &[0u8; 3]).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }
}
