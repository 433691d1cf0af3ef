//! # Cart Client

use crate::cart_actor::{CartAction, CartError};
use crate::model::{Cart, CartCreate, CartId, CartLine, CartSummary, MenuItem, MenuItemId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::instrument;

#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn open(&self, delivery_fee: f64) -> Result<CartId, CartError> {
        self.inner
            .create(CartCreate { delivery_fee })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, item), fields(item = %item.id))]
    pub async fn add(&self, cart: CartId, item: MenuItem) -> Result<CartSummary, CartError> {
        self.act(cart, CartAction::Add(item)).await
    }

    /// Adjusts a line by `delta`, never below 1.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        cart: CartId,
        item_id: MenuItemId,
        delta: i32,
    ) -> Result<CartSummary, CartError> {
        self.act(cart, CartAction::SetQuantity { item_id, delta })
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, cart: CartId, item_id: MenuItemId) -> Result<CartSummary, CartError> {
        self.act(cart, CartAction::Remove(item_id)).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, cart: CartId) -> Result<CartSummary, CartError> {
        self.act(cart, CartAction::Clear).await
    }

    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn remove_ordered(
        &self,
        cart: CartId,
        lines: Vec<CartLine>,
    ) -> Result<CartSummary, CartError> {
        self.act(cart, CartAction::RemoveOrdered(lines)).await
    }

    #[instrument(skip(self))]
    pub async fn summary(&self, cart: CartId) -> Result<CartSummary, CartError> {
        self.get(cart)
            .await?
            .map(|cart| cart.summary())
            .ok_or_else(|| CartError::NotFound(cart.to_string()))
    }

    async fn act(&self, cart: CartId, action: CartAction) -> Result<CartSummary, CartError> {
        self.inner
            .perform_action(cart, action)
            .await
            .map_err(Self::map_error)
    }
}

impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CartError {
        match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            other => other
                .downcast_entity::<CartError>()
                .unwrap_or_else(|e| CartError::ActorCommunicationError(e.to_string())),
        }
    }
}
