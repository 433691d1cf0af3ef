use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A point on the map in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("coordinates must be finite, got ({lat}, {lng})")]
pub struct InvalidCoordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinates> {
        if lat.is_finite() && lng.is_finite() {
            Ok(Self { lat, lng })
        } else {
            Err(InvalidCoordinates { lat, lng })
        }
    }

    /// Linear interpolation towards `to`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, to: Coordinates, t: f64) -> Coordinates {
        let t = t.clamp(0.0, 1.0);
        Coordinates {
            lat: self.lat + (to.lat - self.lat) * t,
            lng: self.lng + (to.lng - self.lng) * t,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinates::new(f64::NAN, 1.0).is_err());
        assert!(Coordinates::new(1.0, f64::INFINITY).is_err());
        assert_eq!(
            Coordinates::new(40.7128, -74.006).unwrap(),
            Coordinates { lat: 40.7128, lng: -74.006 }
        );
    }

    #[test]
    fn lerp_halfway_and_clamped() {
        let a = Coordinates { lat: 0.0, lng: 0.0 };
        let b = Coordinates { lat: 10.0, lng: 10.0 };
        assert_eq!(a.lerp(b, 0.5), Coordinates { lat: 5.0, lng: 5.0 });
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
    }
}
