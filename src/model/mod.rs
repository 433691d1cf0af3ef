//! Domain model shared by the actors.

pub mod cart;
pub mod checkout;
pub mod geo;
pub mod order;
pub mod restaurant;

pub use cart::{Cart, CartCreate, CartId, CartLine, CartSummary};
pub use checkout::{CheckoutId, CheckoutSession, CheckoutStep, ConfirmTicket};
pub use geo::{Coordinates, InvalidCoordinates};
pub use order::{DeliveryStatus, Order, OrderCreate, OrderId, OrderLine, PaymentMethod};
pub use restaurant::{
    average_rating, DeliveryWindow, MenuEntry, MenuItem, MenuItemId, Restaurant, RestaurantCreate,
    RestaurantId, Review, ReviewDraft, ReviewError,
};
