//! Dissociation query parameters.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::coordinate::CoordinatePair;
use super::term::TermPair;

/// Default proximity radius, in the units of the stored geometry (mm).
pub const DEFAULT_PROXIMITY_RADIUS: f64 = 8.0;

/// Default row cap for term dissociations.
pub const DEFAULT_TERM_LIMIT: u32 = 100;

/// Default row cap for spatial dissociations.
pub const DEFAULT_LOCATION_LIMIT: u32 = 200;

/// Maximum distance for a stored coordinate to count as "near" a query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ProximityRadius(f64);

impl ProximityRadius {
    /// Creates a radius, rejecting zero, negative and non-finite values.
    pub fn new(radius: f64) -> Result<Self, ValidationError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ValidationError::InvalidParameter {
                parameter: "radius".to_string(),
                message: format!("must be a positive finite number, got {}", radius),
            });
        }
        Ok(Self(radius))
    }

    /// Returns the radius value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ProximityRadius {
    fn default() -> Self {
        Self(DEFAULT_PROXIMITY_RADIUS)
    }
}

impl TryFrom<f64> for ProximityRadius {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProximityRadius> for f64 {
    fn from(radius: ProximityRadius) -> Self {
        radius.0
    }
}

/// Row caps applied to dissociation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DissociationLimits {
    /// Cap for term dissociations.
    pub terms: u32,
    /// Cap for spatial dissociations.
    pub locations: u32,
}

impl Default for DissociationLimits {
    fn default() -> Self {
        Self {
            terms: DEFAULT_TERM_LIMIT,
            locations: DEFAULT_LOCATION_LIMIT,
        }
    }
}

impl DissociationLimits {
    /// Checks that both caps are non-zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.terms == 0 || self.locations == 0 {
            return Err(ValidationError::InvalidParameter {
                parameter: "limit".to_string(),
                message: "result caps must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// A term dissociation request.
#[derive(Debug, Clone, PartialEq)]
pub struct TermDissociation {
    /// Include/exclude phrases.
    pub terms: TermPair,
    /// Maximum number of studies returned.
    pub limit: u32,
}

impl TermDissociation {
    /// Creates a request with the default cap.
    pub fn new(terms: TermPair) -> Self {
        Self {
            terms,
            limit: DEFAULT_TERM_LIMIT,
        }
    }

    /// Overrides the cap.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// A spatial dissociation request.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialDissociation {
    /// Include/exclude points.
    pub points: CoordinatePair,
    /// Proximity radius.
    pub radius: ProximityRadius,
    /// Maximum number of studies returned.
    pub limit: u32,
}

impl SpatialDissociation {
    /// Creates a request with the default radius and cap.
    pub fn new(points: CoordinatePair) -> Self {
        Self {
            points,
            radius: ProximityRadius::default(),
            limit: DEFAULT_LOCATION_LIMIT,
        }
    }

    /// Overrides the radius.
    pub fn with_radius(mut self, radius: ProximityRadius) -> Self {
        self.radius = radius;
        self
    }

    /// Overrides the cap.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}
