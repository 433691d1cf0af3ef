use crate::model::{CartLine, Coordinates, MenuItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Type-safe identifier for Orders, displayed as `ORD-000042`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORD-{:06}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    CashOnDelivery,
    DigitalWallet,
}

/// Delivery stages in the order they happen; comparisons follow that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Preparing,
    OutForDelivery,
    Delivered,
}

impl Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeliveryStatus::Preparing => "Preparing",
            DeliveryStatus::OutForDelivery => "Out for Delivery",
            DeliveryStatus::Delivered => "Delivered",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item_id: MenuItemId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub image: String,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            item_id: line.item_id.clone(),
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
            image: line.image.clone(),
        }
    }
}

/// A placed order. Everything but `status` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub lines: Vec<OrderLine>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub status: DeliveryStatus,
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub address: String,
    pub placed_at: DateTime<Utc>,
}

/// Payload for appending an order to the ledger.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub lines: Vec<OrderLine>,
    pub delivery_fee: f64,
    pub payment_method: PaymentMethod,
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub address: String,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        let subtotal: f64 = params
            .lines
            .iter()
            .map(|line| line.price * f64::from(line.quantity))
            .sum();
        Self {
            id,
            subtotal,
            delivery_fee: params.delivery_fee,
            total: subtotal + params.delivery_fee,
            lines: params.lines,
            payment_method: params.payment_method,
            status: DeliveryStatus::Preparing,
            origin: params.origin,
            destination: params.destination,
            address: params.address,
            placed_at: params.placed_at,
        }
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Moves the status forward. Returns false, leaving the status alone, for
    /// anything that is not an advance.
    pub fn advance_status(&mut self, next: DeliveryStatus) -> bool {
        if next > self.status {
            self.status = next;
            true
        } else {
            false
        }
    }
}
