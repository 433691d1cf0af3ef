//! Pure delivery progress model, advanced one tick at a time.

use crate::model::{Coordinates, DeliveryStatus};

/// Progress above which the courier has picked the order up.
pub const OUT_FOR_DELIVERY_AFTER: f64 = 0.10;
/// Progress above which the order counts as delivered.
pub const DELIVERED_AFTER: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    /// Progress added per tick.
    pub increment: f64,
    pub initial_eta_minutes: f64,
    /// Minutes taken off the ETA per tick.
    pub eta_step: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            increment: 0.002,
            initial_eta_minutes: 25.0,
            eta_step: 0.05,
        }
    }
}

pub fn status_at(progress: f64) -> DeliveryStatus {
    if progress > DELIVERED_AFTER {
        DeliveryStatus::Delivered
    } else if progress > OUT_FOR_DELIVERY_AFTER {
        DeliveryStatus::OutForDelivery
    } else {
        DeliveryStatus::Preparing
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryProgress {
    origin: Coordinates,
    destination: Coordinates,
    progress: f64,
    status: DeliveryStatus,
    eta_minutes: f64,
    settings: SimulationSettings,
}

impl DeliveryProgress {
    pub fn new(origin: Coordinates, destination: Coordinates, settings: SimulationSettings) -> Self {
        Self {
            origin,
            destination,
            progress: 0.0,
            status: DeliveryStatus::Preparing,
            eta_minutes: settings.initial_eta_minutes,
            settings,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn status(&self) -> DeliveryStatus {
        self.status
    }

    pub fn eta_minutes(&self) -> f64 {
        self.eta_minutes
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Courier position, interpolated between restaurant and destination.
    pub fn position(&self) -> Coordinates {
        self.origin.lerp(self.destination, self.progress)
    }

    /// Applies one tick. Returns false, changing nothing, once complete.
    pub fn tick(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.eta_minutes = (self.eta_minutes - self.settings.eta_step).max(0.0);
        self.set_progress(self.progress + self.settings.increment);
        true
    }

    /// Jumps forward to `ratio`; moving backwards is ignored.
    pub fn advance_to(&mut self, ratio: f64) {
        if ratio > self.progress {
            self.set_progress(ratio);
        }
    }

    fn set_progress(&mut self, ratio: f64) {
        self.progress = ratio.clamp(0.0, 1.0);
        self.status = self.status.max(status_at(self.progress));
    }
}
