//! [`ActorEntity`] implementation for [`Order`].

use super::{OrderAction, OrderError};
use crate::model::{DeliveryStatus, Order, OrderCreate, OrderId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = DeliveryStatus;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(line) = params.lines.iter().find(|l| l.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "{} has quantity 0",
                line.item_id
            )));
        }
        if !(params.origin.is_finite() && params.destination.is_finite()) {
            return Err(OrderError::ValidationError(
                "route coordinates must be finite".into(),
            ));
        }
        Ok(Order::new(id, params))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &(),
    ) -> Result<DeliveryStatus, OrderError> {
        match action {
            OrderAction::AdvanceStatus(next) => {
                if !self.advance_status(next) {
                    debug!(id = %self.id, current = %self.status, requested = %next, "Status unchanged");
                }
                Ok(self.status)
            }
        }
    }
}
