//! Typed clients, one per actor. Each wraps a
//! [`ResourceClient`](actor_framework::ResourceClient) and maps framework
//! failures into its domain error.

pub mod cart_client;
pub mod catalog_client;
pub mod checkout_client;
pub mod order_client;

pub use cart_client::CartClient;
pub use catalog_client::CatalogClient;
pub use checkout_client::CheckoutClient;
pub use order_client::OrderClient;
