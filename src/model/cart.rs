use crate::model::{MenuItem, MenuItemId, RestaurantId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Type-safe identifier for Carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cart-{}", self.0)
    }
}

/// A menu item snapshot plus quantity. The price is locked when the line is first added.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item_id: MenuItemId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Insertion-ordered cart keyed by menu item.
#[derive(Debug, Clone)]
pub struct Cart {
    pub id: CartId,
    lines: IndexMap<MenuItemId, CartLine>,
    flat_fee: f64,
}

/// Payload for opening a cart.
#[derive(Debug, Clone)]
pub struct CartCreate {
    /// Fee charged on any non-empty cart.
    pub delivery_fee: f64,
}

/// Derived view of a cart, returned by every cart action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub cart_id: CartId,
    pub lines: Vec<CartLine>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub item_count: u32,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Cart {
    pub fn new(id: CartId, flat_fee: f64) -> Self {
        Self {
            id,
            lines: IndexMap::new(),
            flat_fee,
        }
    }

    /// Increments the line for `item`, or appends a new line with quantity 1.
    pub fn add(&mut self, item: &MenuItem) {
        self.lines
            .entry(item.id.clone())
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| CartLine {
                item_id: item.id.clone(),
                restaurant_id: item.restaurant_id,
                name: item.name.clone(),
                price: item.price,
                image: item.image.clone(),
                quantity: 1,
            });
    }

    /// Applies `delta`, never going below 1. Unknown items are ignored.
    pub fn set_quantity(&mut self, item_id: &MenuItemId, delta: i32) {
        if let Some(line) = self.lines.get_mut(item_id) {
            let next = (i64::from(line.quantity) + i64::from(delta)).clamp(1, i64::from(u32::MAX));
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        }
    }

    pub fn remove(&mut self, item_id: &MenuItemId) {
        self.lines.shift_remove(item_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Takes `ordered` out of the cart. Quantities added since the snapshot
    /// stay behind; a line whose quantity is used up is removed.
    pub fn remove_ordered(&mut self, ordered: &[CartLine]) {
        for placed in ordered {
            if let Some(line) = self.lines.get_mut(&placed.item_id) {
                if line.quantity > placed.quantity {
                    line.quantity -= placed.quantity;
                } else {
                    self.lines.shift_remove(&placed.item_id);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn subtotal(&self) -> f64 {
        self.lines().map(CartLine::line_total).sum()
    }

    pub fn delivery_fee(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.flat_fee
        }
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.delivery_fee()
    }

    pub fn item_count(&self) -> u32 {
        self.lines().map(|line| line.quantity).sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            cart_id: self.id,
            lines: self.lines().cloned().collect(),
            subtotal: self.subtotal(),
            delivery_fee: self.delivery_fee(),
            total: self.total(),
            item_count: self.item_count(),
        }
    }
}
