//! Environment-driven configuration.
//!
//! Every setting has a default; a missing variable is logged and the default
//! used, an unparsable or out-of-range one is an error.

use crate::delivery::{SimulationSettings, TrackerSettings};
use crate::model::Coordinates;
use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub delivery_fee: f64,
    pub checkout_delay: Duration,
    pub tracking_tick: Duration,
    pub tracking_increment: f64,
    /// Used when geolocation fails and when a cart's origin cannot be resolved.
    pub default_location: Coordinates,
    /// Catalog JSON to load instead of the bundled demo catalog.
    pub catalog_path: Option<PathBuf>,
}

/// Settings the checkout client needs at confirm time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutSettings {
    pub processing_delay: Duration,
    pub fallback_location: Coordinates,
}

const DEFAULT_CHECKOUT_DELAY_MS: u64 = 1500;
const DEFAULT_TRACKING_TICK_MS: u64 = 500;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delivery_fee: 2.99,
            checkout_delay: Duration::from_millis(DEFAULT_CHECKOUT_DELAY_MS),
            tracking_tick: Duration::from_millis(DEFAULT_TRACKING_TICK_MS),
            tracking_increment: 0.002,
            default_location: Coordinates {
                lat: 40.7128,
                lng: -74.0060,
            },
            catalog_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            delivery_fee: try_load(&lookup, "FOOD_DELIVERY_FEE", defaults.delivery_fee)?,
            checkout_delay: Duration::from_millis(try_load(
                &lookup,
                "FOOD_CHECKOUT_DELAY_MS",
                DEFAULT_CHECKOUT_DELAY_MS,
            )?),
            tracking_tick: Duration::from_millis(try_load(
                &lookup,
                "FOOD_TRACKING_TICK_MS",
                DEFAULT_TRACKING_TICK_MS,
            )?),
            tracking_increment: try_load(
                &lookup,
                "FOOD_TRACKING_INCREMENT",
                defaults.tracking_increment,
            )?,
            default_location: Coordinates {
                lat: try_load(&lookup, "FOOD_DEFAULT_LAT", defaults.default_location.lat)?,
                lng: try_load(&lookup, "FOOD_DEFAULT_LNG", defaults.default_location.lng)?,
            },
            catalog_path: lookup("FOOD_CATALOG_PATH").map(PathBuf::from),
        };
        config.validate()?;
        info!(?config, "Configuration loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key, value: String, reason: &str| ConfigError::Invalid {
            key,
            value,
            reason: reason.to_string(),
        };
        if !(self.delivery_fee.is_finite() && self.delivery_fee > 0.0) {
            return Err(invalid(
                "FOOD_DELIVERY_FEE",
                self.delivery_fee.to_string(),
                "must be a positive amount",
            ));
        }
        if self.tracking_tick.is_zero() {
            return Err(invalid("FOOD_TRACKING_TICK_MS", "0".into(), "must be non-zero"));
        }
        if !(self.tracking_increment > 0.0 && self.tracking_increment <= 1.0) {
            return Err(invalid(
                "FOOD_TRACKING_INCREMENT",
                self.tracking_increment.to_string(),
                "must be in (0, 1]",
            ));
        }
        if !self.default_location.is_finite() {
            return Err(invalid(
                "FOOD_DEFAULT_LAT/FOOD_DEFAULT_LNG",
                self.default_location.to_string(),
                "must be finite",
            ));
        }
        Ok(())
    }

    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            processing_delay: self.checkout_delay,
            fallback_location: self.default_location,
        }
    }

    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            tick: self.tracking_tick,
            simulation: SimulationSettings {
                increment: self.tracking_increment,
                ..SimulationSettings::default()
            },
        }
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            debug!("{key} not set, using default: {default}");
            Ok(default)
        }
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
