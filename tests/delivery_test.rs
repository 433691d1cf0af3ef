use chrono::Utc;
use food_order::clients::OrderClient;
use food_order::delivery::{DeliveryTracker, SimulationSettings, TrackerSettings, TrackingSnapshot};
use food_order::model::{
    Coordinates, DeliveryStatus, MenuItemId, Order, OrderCreate, OrderLine, PaymentMethod,
};
use food_order::order_actor::OrderError;
use std::time::Duration;
use tokio::sync::watch;

const ORIGIN: Coordinates = Coordinates { lat: 40.0, lng: -74.0 };
const DESTINATION: Coordinates = Coordinates { lat: 41.0, lng: -73.0 };

fn ledger() -> (OrderClient, tokio::task::JoinHandle<()>) {
    let (actor, client) = food_order::order_actor::new();
    (OrderClient::new(client), tokio::spawn(actor.run(())))
}

fn params(item: &str) -> OrderCreate {
    OrderCreate {
        lines: vec![OrderLine {
            item_id: MenuItemId::new(item),
            name: item.to_uppercase(),
            price: 10.0,
            quantity: 2,
            image: String::new(),
        }],
        delivery_fee: 2.99,
        payment_method: PaymentMethod::DigitalWallet,
        origin: ORIGIN,
        destination: DESTINATION,
        address: "My Current Location".to_string(),
        placed_at: Utc::now(),
    }
}

async fn place(orders: &OrderClient, item: &str) -> Order {
    let id = orders.append(params(item)).await.unwrap();
    orders.find_by_id(id).await.unwrap().unwrap()
}

/// Four ticks of a quarter each.
fn quick() -> TrackerSettings {
    TrackerSettings {
        tick: Duration::from_millis(10),
        simulation: SimulationSettings {
            increment: 0.25,
            ..SimulationSettings::default()
        },
    }
}

async fn wait_for(
    snapshots: &mut watch::Receiver<Option<TrackingSnapshot>>,
    done: impl Fn(&TrackingSnapshot) -> bool,
) -> TrackingSnapshot {
    loop {
        if let Some(snapshot) = snapshots.borrow_and_update().clone() {
            if done(&snapshot) {
                return snapshot;
            }
        }
        snapshots.changed().await.expect("tracker alive");
    }
}

#[tokio::test]
async fn test_ledger_history_is_newest_first() {
    let (orders, handle) = ledger();
    let first = place(&orders, "m-1-1").await;
    let second = place(&orders, "m-2-1").await;

    assert_eq!(first.id.to_string(), "ORD-000001");
    assert_eq!(second.id.to_string(), "ORD-000002");
    assert!((first.total - 22.99).abs() < 1e-9);

    let history: Vec<_> = orders.history().await.unwrap().iter().map(|o| o.id).collect();
    assert_eq!(history, vec![second.id, first.id]);

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_ledger_status_only_moves_forward() {
    let (orders, handle) = ledger();
    let order = place(&orders, "m-3-1").await;

    assert_eq!(
        orders.advance_status(order.id, DeliveryStatus::Delivered).await.unwrap(),
        DeliveryStatus::Delivered
    );
    assert_eq!(
        orders.advance_status(order.id, DeliveryStatus::OutForDelivery).await.unwrap(),
        DeliveryStatus::Delivered
    );

    let unknown = food_order::model::OrderId(42);
    assert!(matches!(
        orders.advance_status(unknown, DeliveryStatus::Delivered).await,
        Err(OrderError::NotFound(_))
    ));
    assert_eq!(orders.find_by_id(unknown).await.unwrap(), None);

    let mut empty = params("m-3-2");
    empty.lines.clear();
    assert!(matches!(orders.append(empty).await, Err(OrderError::EmptyOrder)));

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_tracking_runs_to_delivered_and_writes_through() {
    let (orders, handle) = ledger();
    let order = place(&orders, "m-4-1").await;

    let mut tracker = DeliveryTracker::new(orders.clone(), quick());
    let mut snapshots = tracker.subscribe();
    tracker.track(&order);

    let initial = snapshots.borrow_and_update().clone().unwrap();
    assert_eq!(initial.order_id, order.id);
    assert_eq!(initial.progress, 0.0);
    assert_eq!(initial.status, DeliveryStatus::Preparing);
    assert_eq!(initial.position, ORIGIN);
    assert_eq!(tracker.tracking(), Some(order.id));

    let last = wait_for(&mut snapshots, |s| s.progress >= 1.0).await;
    assert_eq!(last.status, DeliveryStatus::Delivered);
    assert_eq!(last.position, DESTINATION);
    assert!(last.eta_minutes < initial.eta_minutes);

    let stored = orders.find_by_id(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, DeliveryStatus::Delivered);

    // The task ends on its own once delivered.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(tracker.tracking(), None);

    drop(tracker);
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_stop_halts_ticking() {
    let (orders, handle) = ledger();
    let order = place(&orders, "m-1-2").await;

    let mut tracker = DeliveryTracker::new(orders.clone(), quick());
    let snapshots = tracker.subscribe();
    tracker.track(&order);
    tracker.stop();
    assert_eq!(tracker.tracking(), None);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let snapshot = snapshots.borrow().clone().unwrap();
    assert_eq!(snapshot.progress, 0.0);

    let stored = orders.find_by_id(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, DeliveryStatus::Preparing);

    drop(tracker);
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_tracking_another_order_restarts_from_zero() {
    let (orders, handle) = ledger();
    let first = place(&orders, "m-2-2").await;
    let second = place(&orders, "m-2-3").await;

    let mut tracker = DeliveryTracker::new(orders.clone(), quick());
    let mut snapshots = tracker.subscribe();
    tracker.track(&first);
    wait_for(&mut snapshots, |s| s.progress >= 0.5).await;

    tracker.track(&second);
    let restarted = snapshots.borrow_and_update().clone().unwrap();
    assert_eq!(restarted.order_id, second.id);
    assert_eq!(restarted.progress, 0.0);
    assert_eq!(tracker.tracking(), Some(second.id));

    let done = wait_for(&mut snapshots, |s| s.progress >= 1.0).await;
    assert_eq!(done.order_id, second.id);

    let first = orders.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(first.status, DeliveryStatus::OutForDelivery);

    drop(tracker);
    drop(orders);
    handle.await.unwrap();
}
