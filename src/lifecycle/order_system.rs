use crate::cart_actor::CartError;
use crate::catalog::seed;
use crate::checkout_actor::CheckoutContext;
use crate::clients::{CartClient, CatalogClient, CheckoutClient, OrderClient};
use crate::config::AppConfig;
use crate::delivery::DeliveryTracker;
use crate::events::UiNotifier;
use crate::location::Geolocator;
use crate::model::{CartId, RestaurantId};
use crate::restaurant_actor::CatalogError;
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the food ordering core.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping all actors in the system
/// - **Dependency Wiring**: The checkout actor reads carts and the geolocator;
///   the checkout client also writes to the ledger and reads the catalog
/// - **Shared Settings**: Delivery fee, processing delay and tick rate come from [`AppConfig`]
///
/// # Architecture
///
/// Four actors run, one per resource:
/// - **Restaurant Actor**: The catalog, its menus and reviews
/// - **Cart Actor**: Shopper carts; notifies the UI when an item is added
/// - **Checkout Actor**: Checkout sessions and their step machine
/// - **Order Actor**: The append-only ledger of placed orders
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new(AppConfig::default(), Arc::new(UnavailableGeolocator));
/// system.load_catalog().await?;
///
/// let cart = system.open_cart().await?;
/// let checkout = system.checkout.open(cart).await?;
/// // ... walk the steps, then:
/// let order = system.checkout.confirm(checkout).await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    /// Client for the restaurant actor
    pub catalog: CatalogClient,

    /// Client for the cart actor
    pub carts: CartClient,

    /// Client for the checkout actor
    pub checkout: CheckoutClient,

    /// Client for the order ledger
    pub orders: OrderClient,

    /// Channel for UI-facing events
    pub ui: UiNotifier,

    config: AppConfig,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns every actor and wires their dependencies.
    ///
    /// Must be called from inside a Tokio runtime.
    pub fn new(config: AppConfig, geolocator: Arc<dyn Geolocator>) -> Self {
        let ui = UiNotifier::default();

        // 1. Create actors (no dependencies)
        let (restaurant_actor, restaurant_client) = crate::restaurant_actor::new();
        let (cart_actor, cart_client) = crate::cart_actor::new();
        let (order_actor, order_client) = crate::order_actor::new();
        let (checkout_actor, checkout_client) = crate::checkout_actor::new();

        let catalog = CatalogClient::new(restaurant_client);
        let carts = CartClient::new(cart_client);
        let orders = OrderClient::new(order_client);

        // 2. Start actors with injected context
        let restaurant_handle = tokio::spawn(restaurant_actor.run(()));
        let cart_handle = tokio::spawn(cart_actor.run(ui.clone()));
        let order_handle = tokio::spawn(order_actor.run(()));
        let checkout_handle = tokio::spawn(checkout_actor.run(CheckoutContext {
            cart: carts.clone(),
            geolocator,
            fallback_location: config.default_location,
        }));

        let checkout = CheckoutClient::new(
            checkout_client,
            carts.clone(),
            orders.clone(),
            catalog.clone(),
            ui.clone(),
            config.checkout_settings(),
        );

        info!("Order system started");
        Self {
            catalog,
            carts,
            checkout,
            orders,
            ui,
            config,
            // The checkout actor holds a cart client, so it has to drain first.
            handles: vec![checkout_handle, cart_handle, order_handle, restaurant_handle],
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Loads the configured catalog file, or the bundled demo catalog.
    pub async fn load_catalog(&self) -> Result<Vec<RestaurantId>, CatalogError> {
        let restaurants = seed::load(self.config.catalog_path.as_deref())?;
        self.catalog.load(restaurants).await
    }

    /// Opens an empty cart charging the configured delivery fee.
    pub async fn open_cart(&self) -> Result<CartId, CartError> {
        self.carts.open(self.config.delivery_fee).await
    }

    /// A delivery tracker that writes status changes to this system's ledger.
    pub fn tracker(&self) -> DeliveryTracker {
        DeliveryTracker::new(self.orders.clone(), self.config.tracker_settings())
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops every client, which closes the actors' channels, then waits for
    /// each actor task to finish. Clients cloned out of the system (trackers
    /// included) keep their actor alive and must be dropped beforehand.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        let Self {
            catalog,
            carts,
            checkout,
            orders,
            ui,
            handles,
            ..
        } = self;
        drop(checkout);
        drop(carts);
        drop(orders);
        drop(catalog);
        drop(ui);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
