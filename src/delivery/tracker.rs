//! Timer-driven delivery tracking for one order at a time.

use super::progress::{DeliveryProgress, SimulationSettings};
use crate::clients::OrderClient;
use crate::model::{Coordinates, DeliveryStatus, Order, OrderId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    pub tick: Duration,
    pub simulation: SimulationSettings,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(500),
            simulation: SimulationSettings::default(),
        }
    }
}

/// What the tracking view shows after each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSnapshot {
    pub order_id: OrderId,
    pub progress: f64,
    pub status: DeliveryStatus,
    pub position: Coordinates,
    pub eta_minutes: f64,
}

impl TrackingSnapshot {
    fn of(order_id: OrderId, progress: &DeliveryProgress) -> Self {
        Self {
            order_id,
            progress: progress.progress(),
            status: progress.status(),
            position: progress.position(),
            eta_minutes: progress.eta_minutes(),
        }
    }
}

/// Cancels its tick task when dropped.
struct TrackingHandle {
    order_id: OrderId,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl Drop for TrackingHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Runs the delivery simulation for the order being watched.
///
/// Snapshots are published on a watch channel; status changes are written
/// through to the ledger.
pub struct DeliveryTracker {
    orders: OrderClient,
    settings: TrackerSettings,
    snapshots: Arc<watch::Sender<Option<TrackingSnapshot>>>,
    active: Option<TrackingHandle>,
}

impl DeliveryTracker {
    pub fn new(orders: OrderClient, settings: TrackerSettings) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            orders,
            settings,
            snapshots: Arc::new(sender),
            active: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<TrackingSnapshot>> {
        self.snapshots.subscribe()
    }

    /// Order currently tracked, if its task is still running.
    pub fn tracking(&self) -> Option<OrderId> {
        self.active
            .as_ref()
            .filter(|handle| !handle.task.is_finished())
            .map(|handle| handle.order_id)
    }

    /// Starts ticking for `order`, replacing any delivery already tracked.
    pub fn track(&mut self, order: &Order) {
        self.stop();

        let progress = DeliveryProgress::new(order.origin, order.destination, self.settings.simulation);
        self.snapshots
            .send_replace(Some(TrackingSnapshot::of(order.id, &progress)));

        let token = CancellationToken::new();
        let task = tokio::spawn(run_ticks(
            order.id,
            progress,
            self.settings.tick,
            self.orders.clone(),
            self.snapshots.clone(),
            token.clone(),
        ));
        info!(order = %order.id, "Tracking started");
        self.active = Some(TrackingHandle {
            order_id: order.id,
            token,
            task,
        });
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            debug!(order = %handle.order_id, "Tracking stopped");
        }
    }
}

async fn run_ticks(
    order_id: OrderId,
    mut progress: DeliveryProgress,
    tick: Duration,
    orders: OrderClient,
    snapshots: Arc<watch::Sender<Option<TrackingSnapshot>>>,
    token: CancellationToken,
) {
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick fires immediately.
    interval.tick().await;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(order = %order_id, "Tick task cancelled");
                return;
            }
            _ = interval.tick() => {}
        }

        let before = progress.status();
        if !progress.tick() {
            break;
        }
        if progress.status() != before {
            match orders.advance_status(order_id, progress.status()).await {
                Ok(status) => info!(order = %order_id, %status, "Delivery status changed"),
                Err(e) => warn!(order = %order_id, error = %e, "Status write-through failed"),
            }
        }
        if token.is_cancelled() {
            return;
        }
        snapshots.send_replace(Some(TrackingSnapshot::of(order_id, &progress)));
        if progress.is_complete() {
            break;
        }
    }
    info!(order = %order_id, "Delivery complete");
}
