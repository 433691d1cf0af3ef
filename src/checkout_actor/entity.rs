//! [`ActorEntity`] implementation for [`CheckoutSession`].

use super::{CheckoutAction, CheckoutActionResult, CheckoutError, CheckoutUpdate};
use crate::clients::CartClient;
use crate::location::{Geolocator, CURRENT_LOCATION_LABEL, FALLBACK_LOCATION_LABEL};
use crate::model::{CartId, CartSummary, CheckoutId, CheckoutSession, CheckoutStep, Coordinates};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Dependencies of the checkout actor.
#[derive(Clone)]
pub struct CheckoutContext {
    pub cart: CartClient,
    pub geolocator: Arc<dyn Geolocator>,
    pub fallback_location: Coordinates,
}

/// Creation parameters: the cart being checked out.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutCreate {
    pub cart_id: CartId,
}

impl CheckoutContext {
    async fn cart_summary(&self, cart_id: CartId) -> Result<CartSummary, CheckoutError> {
        self.cart
            .summary(cart_id)
            .await
            .map_err(|e| CheckoutError::Collaborator(e.to_string()))
    }

    async fn current_location(&self) -> (&'static str, Coordinates) {
        match self.geolocator.current_position().await {
            Ok(position) if position.is_finite() => (CURRENT_LOCATION_LABEL, position),
            Ok(position) => {
                warn!(%position, "Geolocator returned an unusable position; using default location");
                (FALLBACK_LOCATION_LABEL, self.fallback_location)
            }
            Err(e) => {
                warn!(error = %e, "Geolocation failed; using default location");
                (FALLBACK_LOCATION_LABEL, self.fallback_location)
            }
        }
    }
}

#[async_trait]
impl ActorEntity for CheckoutSession {
    type Id = CheckoutId;
    type Create = CheckoutCreate;
    type Update = CheckoutUpdate;
    type Action = CheckoutAction;
    type ActionResult = CheckoutActionResult;
    type Context = CheckoutContext;
    type Error = CheckoutError;

    fn from_create_params(id: CheckoutId, params: CheckoutCreate) -> Result<Self, CheckoutError> {
        Ok(CheckoutSession::new(id, params.cart_id))
    }

    /// Refuses to open a session for a cart that does not exist. An empty
    /// cart is fine here; the Cart step guards on contents.
    async fn on_create(&mut self, ctx: &CheckoutContext) -> Result<(), CheckoutError> {
        ctx.cart_summary(self.cart_id).await?;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: CheckoutUpdate,
        _ctx: &CheckoutContext,
    ) -> Result<(), CheckoutError> {
        self.ensure_idle()?;
        if let Some(label) = update.address_label {
            self.set_address_label(label)?;
        }
        if let Some(method) = update.payment_method {
            self.select_payment(method)?;
        }
        Ok(())
    }

    /// A session with an order in flight cannot be closed.
    async fn on_delete(&self, _ctx: &CheckoutContext) -> Result<(), CheckoutError> {
        self.ensure_idle()
    }

    async fn handle_action(
        &mut self,
        action: CheckoutAction,
        ctx: &CheckoutContext,
    ) -> Result<CheckoutActionResult, CheckoutError> {
        match action {
            CheckoutAction::Advance => {
                let has_items = match self.step {
                    CheckoutStep::Cart => !ctx.cart_summary(self.cart_id).await?.is_empty(),
                    _ => true,
                };
                let step = self.advance(has_items)?;
                info!(id = %self.id, %step, "Checkout advanced");
            }
            CheckoutAction::Back => {
                let step = self.back()?;
                info!(id = %self.id, %step, "Checkout went back");
            }
            CheckoutAction::SetLocation { label, coordinates } => {
                self.resolve_location(label, coordinates)?;
            }
            CheckoutAction::UseCurrentLocation => {
                self.ensure_step(CheckoutStep::Location)?;
                let (label, position) = ctx.current_location().await;
                self.resolve_location(label, position)?;
            }
            CheckoutAction::BeginConfirm => {
                self.ensure_step(CheckoutStep::Payment)?;
                self.ensure_idle()?;
                let cart = ctx.cart_summary(self.cart_id).await?;
                return self.begin_confirm(cart).map(CheckoutActionResult::Confirming);
            }
            CheckoutAction::FinishConfirm(order_id) => self.finish_confirm(order_id)?,
            CheckoutAction::AbortConfirm => self.abort_confirm(),
        }
        Ok(CheckoutActionResult::Session(self.clone()))
    }
}
