//! Feature identities attached to batched geometry.

use pnts_decode::{BatchTableInfo, DecodeError, DecodedPointCloud};

use crate::types::ModelId;

/// A single pickable feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub element_id: ModelId,
}

/// Features a batch can resolve, indexed by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFeatures {
    /// Model the batch belongs to.
    pub model_id: ModelId,
    /// Upper bound on the number of features.
    pub max_features: usize,
    features: Vec<Feature>,
}

impl BatchFeatures {
    #[must_use]
    pub fn new(max_features: usize, model_id: ModelId) -> Self {
        Self {
            model_id,
            max_features,
            features: Vec::new(),
        }
    }

    /// Insert a feature, returning its index. Existing features are not
    /// duplicated; `None` means the table is full.
    pub fn insert(&mut self, feature: Feature) -> Option<usize> {
        if let Some(index) = self.features.iter().position(|f| *f == feature) {
            return Some(index);
        }
        if self.features.len() >= self.max_features {
            return None;
        }
        self.features.push(feature);
        Some(self.features.len() - 1)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Attributes associated with the points of a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeTable {
    /// No attributes at all: an empty table under the owning model.
    None,
    /// Every point belongs to one feature.
    SingleFeature(ModelId),
    /// A per-point batch table, which is not decoded.
    Table(BatchTableInfo),
}

impl AttributeTable {
    /// Classify a decoded tile owned by `model_id`.
    ///
    /// A decoded tile always has an owner, so this never yields
    /// [`AttributeTable::None`].
    #[must_use]
    pub fn classify(decoded: &DecodedPointCloud<'_>, model_id: ModelId) -> Self {
        match decoded.batch_table {
            Some(info) => Self::Table(info),
            None => Self::SingleFeature(model_id),
        }
    }

    /// Features for a batch owned by `owner`.
    ///
    /// # Errors
    ///
    /// [`AttributeTable::Table`] fails with [`DecodeError::UnsupportedFeature`]:
    /// it cannot be collapsed into one feature without losing information.
    pub fn to_batch_features(&self, owner: ModelId) -> Result<BatchFeatures, DecodeError> {
        match self {
            Self::None => Ok(BatchFeatures::new(0, owner)),
            Self::SingleFeature(model_id) => {
                let mut features = BatchFeatures::new(1, owner);
                features.insert(Feature {
                    element_id: *model_id,
                });
                Ok(features)
            }
            Self::Table(info) => Err(DecodeError::UnsupportedFeature {
                feature: info.describe(),
            }),
        }
    }
}
