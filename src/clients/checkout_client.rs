//! # Checkout Client
//!
//! Drives a checkout session and, on confirm, coordinates the cart, the
//! catalog and the ledger to place the order.

use crate::checkout_actor::{
    CheckoutAction, CheckoutActionResult, CheckoutCreate, CheckoutError, CheckoutUpdate,
};
use crate::clients::{CartClient, CatalogClient, OrderClient};
use crate::config::CheckoutSettings;
use crate::events::{UiEvent, UiNotifier};
use crate::model::{
    CartId, CheckoutId, CheckoutSession, ConfirmTicket, Coordinates, Order, OrderCreate, OrderLine,
    PaymentMethod,
};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use chrono::Utc;
use std::fmt::Display;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct CheckoutClient {
    inner: ResourceClient<CheckoutSession>,
    cart: CartClient,
    orders: OrderClient,
    catalog: CatalogClient,
    ui: UiNotifier,
    settings: CheckoutSettings,
}

fn collaborator(e: impl Display) -> CheckoutError {
    CheckoutError::Collaborator(e.to_string())
}

impl CheckoutClient {
    pub fn new(
        inner: ResourceClient<CheckoutSession>,
        cart: CartClient,
        orders: OrderClient,
        catalog: CatalogClient,
        ui: UiNotifier,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            inner,
            cart,
            orders,
            catalog,
            ui,
            settings,
        }
    }

    /// Starts a checkout for `cart` at the Cart step.
    #[instrument(skip(self))]
    pub async fn open(&self, cart: CartId) -> Result<CheckoutId, CheckoutError> {
        self.inner
            .create(CheckoutCreate { cart_id: cart })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn session(&self, id: CheckoutId) -> Result<CheckoutSession, CheckoutError> {
        self.get(id)
            .await?
            .ok_or_else(|| CheckoutError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn advance(&self, id: CheckoutId) -> Result<CheckoutSession, CheckoutError> {
        self.act(id, CheckoutAction::Advance).await
    }

    #[instrument(skip(self))]
    pub async fn back(&self, id: CheckoutId) -> Result<CheckoutSession, CheckoutError> {
        self.act(id, CheckoutAction::Back).await
    }

    /// Records typed address text. Coordinates stay unresolved.
    #[instrument(skip(self))]
    pub async fn set_address_label(
        &self,
        id: CheckoutId,
        label: String,
    ) -> Result<CheckoutSession, CheckoutError> {
        let update = CheckoutUpdate {
            address_label: Some(label),
            ..CheckoutUpdate::default()
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_address(
        &self,
        id: CheckoutId,
        label: String,
        coordinates: Coordinates,
    ) -> Result<CheckoutSession, CheckoutError> {
        self.act(id, CheckoutAction::SetLocation { label, coordinates })
            .await
    }

    /// Resolves the location from the device, or the default location if that fails.
    #[instrument(skip(self))]
    pub async fn use_current_location(&self, id: CheckoutId) -> Result<CheckoutSession, CheckoutError> {
        self.act(id, CheckoutAction::UseCurrentLocation).await
    }

    #[instrument(skip(self))]
    pub async fn select_payment(
        &self,
        id: CheckoutId,
        method: PaymentMethod,
    ) -> Result<CheckoutSession, CheckoutError> {
        let update = CheckoutUpdate {
            payment_method: Some(method),
            ..CheckoutUpdate::default()
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Places the order after the processing delay.
    ///
    /// The cart lines are snapshotted when confirm is called; changes made
    /// during the delay are neither ordered nor lost. On success the order is
    /// in the ledger, its lines are out of the cart, the session is at Success
    /// and [`UiEvent::OrderPlaced`] has been sent. On failure the session stays
    /// at Payment and can be confirmed again.
    #[instrument(skip(self))]
    pub async fn confirm(&self, id: CheckoutId) -> Result<Order, CheckoutError> {
        let ticket = match self
            .inner
            .perform_action(id, CheckoutAction::BeginConfirm)
            .await
            .map_err(Self::map_error)?
        {
            CheckoutActionResult::Confirming(ticket) => ticket,
            CheckoutActionResult::Session(_) => {
                return Err(CheckoutError::ActorCommunicationError(
                    "confirm was not acknowledged".into(),
                ))
            }
        };

        match self.place_order(&ticket).await {
            Ok(order) => {
                if let Err(e) = self.act(id, CheckoutAction::FinishConfirm(order.id)).await {
                    warn!(%id, order = %order.id, error = %e, "Order placed but session not finalised");
                }
                info!(%id, order = %order.id, total = order.total, "Order placed");
                self.ui.notify(UiEvent::OrderPlaced(order.clone()));
                Ok(order)
            }
            Err(e) => {
                warn!(%id, error = %e, "Order placement failed");
                if let Err(release) = self.act(id, CheckoutAction::AbortConfirm).await {
                    warn!(%id, error = %release, "Could not release checkout");
                }
                Err(e)
            }
        }
    }

    async fn place_order(&self, ticket: &ConfirmTicket) -> Result<Order, CheckoutError> {
        tokio::time::sleep(self.settings.processing_delay).await;

        let first = ticket.lines.first().ok_or(CheckoutError::EmptyCart)?;
        let origin = match self.catalog.origin_of(first.restaurant_id).await {
            Ok(origin) => origin,
            Err(e) => {
                warn!(restaurant = %first.restaurant_id, error = %e, "Origin unknown; using default location");
                self.settings.fallback_location
            }
        };

        let order_id = self
            .orders
            .append(OrderCreate {
                lines: ticket.lines.iter().map(OrderLine::from).collect(),
                delivery_fee: ticket.delivery_fee,
                payment_method: ticket.payment_method,
                origin,
                destination: ticket.destination,
                address: ticket.address.clone(),
                placed_at: Utc::now(),
            })
            .await
            .map_err(collaborator)?;

        if let Err(e) = self
            .cart
            .remove_ordered(ticket.cart_id, ticket.lines.clone())
            .await
        {
            warn!(cart = %ticket.cart_id, order = %order_id, error = %e, "Ordered lines not removed from cart");
        }

        self.orders
            .find_by_id(order_id)
            .await
            .map_err(collaborator)?
            .ok_or_else(|| collaborator(format!("{order_id} missing from ledger")))
    }

    /// Ends the session. Before Success this discards the address and payment
    /// choices; the cart is never touched. Refused with
    /// [`CheckoutError::AlreadyProcessing`] while a confirm is in flight.
    #[instrument(skip(self))]
    pub async fn close(&self, id: CheckoutId) -> Result<(), CheckoutError> {
        debug!("Closing checkout");
        self.delete(id).await
    }

    async fn act(
        &self,
        id: CheckoutId,
        action: CheckoutAction,
    ) -> Result<CheckoutSession, CheckoutError> {
        match self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?
        {
            CheckoutActionResult::Session(session) => Ok(session),
            CheckoutActionResult::Confirming(_) => Err(CheckoutError::ActorCommunicationError(
                "unexpected confirm ticket".into(),
            )),
        }
    }
}

impl ActorClient<CheckoutSession> for CheckoutClient {
    type Error = CheckoutError;

    fn inner(&self) -> &ResourceClient<CheckoutSession> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CheckoutError {
        match e {
            FrameworkError::NotFound(id) => CheckoutError::NotFound(id),
            other => other
                .downcast_entity::<CheckoutError>()
                .unwrap_or_else(|e| CheckoutError::ActorCommunicationError(e.to_string())),
        }
    }
}
