//! Delivery simulation: a pure progress model and the task that ticks it.

pub mod progress;
pub mod tracker;

pub use progress::{status_at, DeliveryProgress, SimulationSettings};
pub use tracker::{DeliveryTracker, TrackerSettings, TrackingSnapshot};
