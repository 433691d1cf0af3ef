//! # Checkout Actor
//!
//! One [`CheckoutSession`] per open checkout, driving the
//! Cart → Location → Payment → Success pipeline. The session is transient:
//! closing it deletes the entity, which discards address and payment choices
//! without touching the cart.
//!
//! Placing an order spans several actors, so confirm is split. The session
//! raises its processing flag in [`CheckoutAction::BeginConfirm`], the
//! [`CheckoutClient`](crate::clients::CheckoutClient) places the order, and
//! [`CheckoutAction::FinishConfirm`] or [`CheckoutAction::AbortConfirm`]
//! settles it. A second confirm arriving in between sees the flag and is refused.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::{CheckoutContext, CheckoutCreate};
pub use error::*;

use crate::model::CheckoutSession;
use actor_framework::{ResourceActor, ResourceClient};

pub fn new() -> (ResourceActor<CheckoutSession>, ResourceClient<CheckoutSession>) {
    ResourceActor::new(32)
}
