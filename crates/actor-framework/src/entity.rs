//! The trait a domain type implements to be hosted by a [`ResourceActor`](crate::ResourceActor).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Business logic of a resource, independent of how messages reach it.
///
/// The actor owns every instance and calls these hooks one message at a time,
/// so implementations mutate `self` freely without locking. Anything the hooks
/// need from outside (other clients, notifiers, settings) arrives through
/// `Context`, which is handed to [`ResourceActor::run`](crate::ResourceActor::run)
/// once and borrowed by every call.
///
/// Ids are allocated by the actor from a counter starting at 1, hence the
/// `From<u32>` bound.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;
    type Create: Send + Sync + Debug;
    /// Use `()` for resources that are only changed through actions.
    type Update: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Context: Send + Sync;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity from creation parameters. Validation belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs before the entity is stored. An error discards it.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        _update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Runs before removal. An error keeps the entity in the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
