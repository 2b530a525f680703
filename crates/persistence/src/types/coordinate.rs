//! Brain coordinates.
//!
//! Coordinates arrive as `x_y_z` tokens (e.g. `-4_36_8`) and are parsed as
//! floating-point millimetres in the same stereotaxic space as the stored
//! activation peaks. Integral input is accepted, but never required.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const COMPONENT_SEPARATOR: char = '_';

/// A validated 3-D point, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MniCoordinate {
    /// Left/right axis.
    pub x: f64,
    /// Posterior/anterior axis.
    pub y: f64,
    /// Inferior/superior axis.
    pub z: f64,
}

impl MniCoordinate {
    /// Creates a coordinate from its components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Parses an `x_y_z` token.
    ///
    /// Fails with [`ValidationError::MalformedCoordinate`] unless the token
    /// has exactly three components that each parse as a finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use dissoc_persistence::types::MniCoordinate;
    ///
    /// let point = MniCoordinate::parse("-4_36_8.5").unwrap();
    /// assert_eq!(point.to_array(), [-4.0, 36.0, 8.5]);
    ///
    /// assert!(MniCoordinate::parse("1_2").is_err());
    /// assert!(MniCoordinate::parse("a_b_c").is_err());
    /// ```
    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = token.split(COMPONENT_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(ValidationError::malformed_coordinate(
                token,
                format!("expected 3 components, found {}", parts.len()),
            ));
        }

        let mut values = [0.0_f64; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            let value: f64 = part.trim().parse().map_err(|_| {
                ValidationError::malformed_coordinate(token, format!("'{}' is not a number", part))
            })?;
            if !value.is_finite() {
                return Err(ValidationError::malformed_coordinate(
                    token,
                    format!("'{}' is not a finite number", part),
                ));
            }
            *slot = value;
        }

        Ok(Self::new(values[0], values[1], values[2]))
    }

    /// Returns the components as `[x, y, z]`.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean distance to another coordinate.
    pub fn distance_to(&self, other: &MniCoordinate) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl FromStr for MniCoordinate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MniCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.x, self.y, self.z)
    }
}

/// The two points of a spatial dissociation: studies near `include`
/// but not near `exclude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePair {
    /// Point a study must report activation near.
    pub include: MniCoordinate,
    /// Point a study must not report activation near.
    pub exclude: MniCoordinate,
}

impl CoordinatePair {
    /// Parses both wire tokens, failing on the first malformed one.
    pub fn parse(include: &str, exclude: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            include: MniCoordinate::parse(include)?,
            exclude: MniCoordinate::parse(exclude)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integral_components() {
        let point = MniCoordinate::parse("-4_36_8").unwrap();
        assert_eq!(point, MniCoordinate::new(-4.0, 36.0, 8.0));
    }

    #[test]
    fn test_parse_fractional_components() {
        let point: MniCoordinate = "30.5_-60.25_40".parse().unwrap();
        assert_eq!(point.to_array(), [30.5, -60.25, 40.0]);
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        for token in ["1_2", "1_2_3_4", "", "12"] {
            let err = MniCoordinate::parse(token).unwrap_err();
            assert!(
                matches!(err, ValidationError::MalformedCoordinate { .. }),
                "token {token:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        let err = MniCoordinate::parse("a_b_c").unwrap_err();
        match err {
            ValidationError::MalformedCoordinate { token, reason } => {
                assert_eq!(token, "a_b_c");
                assert!(reason.contains("'a'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_component_is_rejected() {
        assert!(MniCoordinate::parse("1__3").is_err());
    }

    #[test]
    fn test_non_finite_is_rejected() {
        assert!(MniCoordinate::parse("NaN_0_0").is_err());
        assert!(MniCoordinate::parse("0_inf_0").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let point = MniCoordinate::new(-4.0, 36.5, 8.0);
        assert_eq!(point.to_string(), "-4_36.5_8");
        assert_eq!(point.to_string().parse::<MniCoordinate>().unwrap(), point);
    }

    #[test]
    fn test_distance() {
        let a = MniCoordinate::new(0.0, 0.0, 0.0);
        let b = MniCoordinate::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pair_reports_first_malformed_token() {
        let err = CoordinatePair::parse("0_0_0", "1_2").unwrap_err();
        assert!(err.to_string().contains("'1_2'"));
        assert!(CoordinatePair::parse("-4_36_8", "30_-60_40").is_ok());
    }
}
