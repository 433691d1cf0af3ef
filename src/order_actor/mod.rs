//! # Order Actor
//!
//! The order ledger. Orders are appended by checkout and never deleted; the
//! only mutation is [`OrderAction::AdvanceStatus`], issued by the delivery
//! tracker.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use actor_framework::{ResourceActor, ResourceClient};

pub fn new() -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(32)
}
