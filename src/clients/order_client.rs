//! # Order Client
//!
//! The ledger API: append, look up, and list newest-first.

use crate::model::{DeliveryStatus, Order, OrderCreate, OrderId};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(lines = params.lines.len()))]
    pub async fn append(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(%id, "Order appended");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.get(id).await
    }

    /// Every order, newest first.
    #[instrument(skip(self))]
    pub async fn history(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list().await?;
        orders.reverse();
        debug!(count = orders.len(), "History");
        Ok(orders)
    }

    /// Returns the status after the request; a regression leaves it unchanged.
    #[instrument(skip(self))]
    pub async fn advance_status(
        &self,
        id: OrderId,
        status: DeliveryStatus,
    ) -> Result<DeliveryStatus, OrderError> {
        self.inner
            .perform_action(id, OrderAction::AdvanceStatus(status))
            .await
            .map_err(Self::map_error)
    }
}

impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> OrderError {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}
