//! [`ActorEntity`] implementation for [`Cart`].

use super::{CartAction, CartError};
use crate::events::{UiEvent, UiNotifier};
use crate::model::{Cart, CartCreate, CartId, CartSummary};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartSummary;
    /// Adding an item opens the cart drawer in the UI.
    type Context = UiNotifier;
    type Error = CartError;

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, CartError> {
        if !(params.delivery_fee.is_finite() && params.delivery_fee > 0.0) {
            return Err(CartError::InvalidFee(params.delivery_fee));
        }
        Ok(Cart::new(id, params.delivery_fee))
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ui: &UiNotifier,
    ) -> Result<CartSummary, CartError> {
        match action {
            CartAction::Add(item) => {
                self.add(&item);
                ui.notify(UiEvent::CartOpened {
                    cart_id: self.id,
                    item_count: self.item_count(),
                });
            }
            CartAction::SetQuantity { item_id, delta } => self.set_quantity(&item_id, delta),
            CartAction::Remove(item_id) => self.remove(&item_id),
            CartAction::Clear => self.clear(),
            CartAction::RemoveOrdered(lines) => self.remove_ordered(&lines),
        }
        Ok(self.summary())
    }
}
