//! # Cart Actor
//!
//! One [`Cart`] entity per shopper. Lines are only ever built from
//! [`MenuItem`](crate::model::MenuItem)s read out of the catalog, and the price
//! is captured on first add.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Cart;
use actor_framework::{ResourceActor, ResourceClient};

pub fn new() -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(32)
}
