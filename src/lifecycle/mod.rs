//! Actor lifecycle: spawning, wiring and shutdown.

pub mod order_system;

pub use order_system::OrderSystem;
