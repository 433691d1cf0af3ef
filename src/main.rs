//! # food-order demo
//!
//! Walks one shopper through the whole flow:
//! 1.  Loading the catalog into the [`OrderSystem`] and browsing it.
//! 2.  Asking the concierge for dishes and filling a cart with them.
//! 3.  Checking out and confirming the order.
//! 4.  Reviewing the restaurant and tracking the delivery to the door.
//!
//! Set `FOOD_TRACKING_TICK_MS` and `FOOD_TRACKING_INCREMENT` to speed up the
//! delivery simulation.

use actor_framework::setup_tracing;
use food_order::catalog::{CatalogQuery, SortBy};
use food_order::concierge::{Concierge, KeywordAdvisor};
use food_order::config::AppConfig;
use food_order::events::UiEvent;
use food_order::lifecycle::OrderSystem;
use food_order::location::FixedGeolocator;
use food_order::model::{Coordinates, PaymentMethod, ReviewDraft};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AppConfig::load().map_err(|e| e.to_string())?;
    info!(?config, "Starting food ordering demo");

    let shopper = FixedGeolocator(Coordinates {
        lat: 40.7484,
        lng: -73.9857,
    });
    let system = OrderSystem::new(config, Arc::new(shopper));
    system.load_catalog().await.map_err(|e| e.to_string())?;

    // Browse
    let restaurants = system
        .catalog
        .browse(&CatalogQuery::default().sort(SortBy::Rating))
        .await
        .map_err(|e| e.to_string())?;
    for restaurant in &restaurants {
        info!(
            id = %restaurant.id,
            name = %restaurant.name,
            rating = restaurant.rating,
            delivery = %restaurant.delivery_window,
            "Restaurant"
        );
    }

    // Ask the concierge
    let concierge = Concierge::new(KeywordAdvisor);
    let picks = concierge.recommend(&restaurants, "crispy avocado").await;
    if let Some(first) = restaurants.first() {
        info!(
            restaurant = %first.name,
            summary = %concierge.summarize_reviews(&first.reviews).await,
            "Review summary"
        );
    }

    let cart = system.open_cart().await.map_err(|e| e.to_string())?;
    let mut ui = system.ui.subscribe();

    let span = tracing::info_span!("cart_filling", %cart);
    let summary = async {
        for pick in &picks {
            info!(item = %pick.menu_item_id, reason = %pick.reason, "Concierge pick");
            let item = system
                .catalog
                .find_menu_item(pick.restaurant_id, &pick.menu_item_id)
                .await
                .map_err(|e| e.to_string())?;
            info!(item = %item.name, blurb = %concierge.describe_dish(&item).await, "Adding to cart");
            system.carts.add(cart, item).await.map_err(|e| e.to_string())?;
        }
        if picks.is_empty() {
            let item = restaurants
                .iter()
                .find_map(|r| r.menu.first().cloned())
                .ok_or("catalog has no menu items")?;
            system.carts.add(cart, item).await.map_err(|e| e.to_string())?;
        }
        let summary = system.carts.summary(cart).await.map_err(|e| e.to_string())?;
        match summary.lines.first() {
            Some(line) => system
                .carts
                .set_quantity(cart, line.item_id.clone(), 1)
                .await
                .map_err(|e| e.to_string()),
            None => Ok(summary),
        }
    }
    .instrument(span)
    .await?;
    info!(
        items = summary.item_count,
        subtotal = summary.subtotal,
        total = summary.total,
        "Cart ready"
    );

    // Checkout
    let span = tracing::info_span!("checkout", %cart);
    let order = async {
        let checkout = system.checkout.open(cart).await?;
        system.checkout.advance(checkout).await?;
        system.checkout.use_current_location(checkout).await?;
        system.checkout.advance(checkout).await?;
        system
            .checkout
            .select_payment(checkout, PaymentMethod::DigitalWallet)
            .await?;
        let order = system.checkout.confirm(checkout).await?;
        system.checkout.close(checkout).await?;
        Ok::<_, food_order::checkout_actor::CheckoutError>(order)
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    while let Ok(event) = ui.try_recv() {
        match event {
            UiEvent::CartOpened { item_count, .. } => info!(item_count, "UI: cart opened"),
            UiEvent::OrderPlaced(order) => info!(order = %order.id, "UI: order placed"),
        }
    }

    if let Some(line) = summary.lines.first() {
        let receipt = system
            .catalog
            .add_review(
                line.restaurant_id,
                ReviewDraft {
                    author: "Demo Shopper".to_string(),
                    rating: 5,
                    comment: "Arrived hot and exactly as ordered.".to_string(),
                },
            )
            .await
            .map_err(|e| e.to_string())?;
        info!(rating = receipt.rating, "Restaurant rating updated");
    }

    // Track
    let mut tracker = system.tracker();
    let mut snapshots = tracker.subscribe();
    tracker.track(&order);
    let mut reported = -1;
    while snapshots.changed().await.is_ok() {
        let Some(snapshot) = snapshots.borrow_and_update().clone() else {
            continue;
        };
        let decile = (snapshot.progress * 10.0).floor() as i32;
        if decile > reported {
            reported = decile;
            info!(
                status = %snapshot.status,
                progress = %format_args!("{:.0}%", snapshot.progress * 100.0),
                eta_minutes = %format_args!("{:.1}", snapshot.eta_minutes),
                position = %snapshot.position,
                "Delivery"
            );
        }
        if snapshot.progress >= 1.0 {
            break;
        }
    }
    drop(tracker);

    match system.orders.history().await {
        Ok(history) => {
            for order in history {
                info!(order = %order.id, status = %order.status, total = order.total, "History");
            }
        }
        Err(e) => warn!(error = %e, "Could not read order history"),
    }

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
