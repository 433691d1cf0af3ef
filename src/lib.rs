//! # food-order
//!
//! > **The ordering core of a food delivery app, built from resource actors.**
//!
//! A shopper browses a restaurant catalog, fills a cart, walks a four-step
//! checkout and places an order. The order lands in a ledger, its delivery is
//! simulated on a timer, and reviews feed back into restaurant ratings.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Orchestrator ([`lifecycle`])
//! - **Role**: Spins up the actors and wires them together.
//! - **Key items**: [`OrderSystem`](lifecycle::OrderSystem), [`shutdown`](lifecycle::OrderSystem::shutdown).
//!
//! ### 2. The Interface ([`clients`])
//! - **Role**: Domain clients over the generic `ResourceClient`. Checkout
//!   confirmation is coordinated here because it spans four actors.
//! - **Key items**: [`CheckoutClient`](clients::CheckoutClient), [`OrderClient`](clients::OrderClient).
//!
//! ### 3. The Actors ([`restaurant_actor`], [`cart_actor`], [`checkout_actor`], [`order_actor`])
//! - **Role**: `ActorEntity` implementations holding the state for each resource.
//!
//! ### 4. Pure Logic ([`model`], [`catalog`], [`delivery`], [`concierge`])
//! - **Role**: Data types and the rules that don't need an actor: browsing,
//!   delivery progress, recommendation parsing.
//!
//! ### 5. The Edges ([`config`], [`events`], [`location`])
//! - **Role**: Environment settings, UI notifications and device geolocation.
//!
//! ## 🚀 Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod cart_actor;
pub mod catalog;
pub mod checkout_actor;
pub mod clients;
pub mod concierge;
pub mod config;
pub mod delivery;
pub mod events;
pub mod lifecycle;
pub mod location;
pub mod model;
pub mod order_actor;
pub mod restaurant_actor;
