//! Geolocation collaborator.

use crate::model::Coordinates;
use async_trait::async_trait;
use thiserror::Error;

/// Label used when the position comes from the device.
pub const CURRENT_LOCATION_LABEL: &str = "My Current Location";
/// Label used when geolocation fails and the default location is substituted.
pub const FALLBACK_LOCATION_LABEL: &str = "Downtown NYC";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeoError {
    #[error("geolocation is not available")]
    Unavailable,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("geolocation timed out")]
    Timeout,
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeoError>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        Ok(self.0)
    }
}

/// A device without location services.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableGeolocator;

#[async_trait]
impl Geolocator for UnavailableGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeoError> {
        Err(GeoError::Unavailable)
    }
}
