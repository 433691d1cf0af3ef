//! # Restaurant Actor
//!
//! Hosts the catalog: one [`Restaurant`] entity per listing, in load order.
//! Reviews are the only mutation after load and go through
//! [`RestaurantAction::AddReview`].
//!
//! - [`entity`]: [`ActorEntity`](actor_framework::ActorEntity) implementation and load validation
//! - [`actions`]: [`RestaurantAction`] and [`ReviewReceipt`]
//! - [`error`]: [`CatalogError`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Restaurant;
use actor_framework::{ResourceActor, ResourceClient};

pub fn new() -> (ResourceActor<Restaurant>, ResourceClient<Restaurant>) {
    ResourceActor::new(32)
}
