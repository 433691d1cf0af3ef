//! The checkout session and its four-step state machine.
//!
//! Every transition either succeeds or returns a [`CheckoutError`] naming what is
//! missing, leaving the session untouched.

use crate::checkout_actor::CheckoutError;
use crate::model::{CartId, CartLine, CartSummary, Coordinates, OrderId, PaymentMethod};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Type-safe identifier for checkout sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckoutId(pub u32);

impl From<u32> for CheckoutId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CheckoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "checkout-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckoutStep {
    Cart,
    Location,
    Payment,
    Success,
}

impl Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub id: CheckoutId,
    pub cart_id: CartId,
    pub step: CheckoutStep,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub payment_method: Option<PaymentMethod>,
    /// Set while a confirm is in flight.
    pub processing: bool,
    pub order_id: Option<OrderId>,
}

/// What a confirm needs to place the order, including the cart lines as
/// they were when confirm was pressed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmTicket {
    pub cart_id: CartId,
    pub lines: Vec<CartLine>,
    pub delivery_fee: f64,
    pub payment_method: PaymentMethod,
    pub destination: Coordinates,
    pub address: String,
}

impl CheckoutSession {
    pub fn new(id: CheckoutId, cart_id: CartId) -> Self {
        Self {
            id,
            cart_id,
            step: CheckoutStep::Cart,
            address: String::new(),
            coordinates: None,
            payment_method: None,
            processing: false,
            order_id: None,
        }
    }

    pub(crate) fn ensure_step(&self, expected: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    pub(crate) fn ensure_idle(&self) -> Result<(), CheckoutError> {
        if self.processing {
            Err(CheckoutError::AlreadyProcessing)
        } else {
            Ok(())
        }
    }

    /// Moves one step forward if the current step is complete.
    pub fn advance(&mut self, cart_has_items: bool) -> Result<CheckoutStep, CheckoutError> {
        self.ensure_idle()?;
        let next = match self.step {
            CheckoutStep::Cart if !cart_has_items => return Err(CheckoutError::EmptyCart),
            CheckoutStep::Cart => CheckoutStep::Location,
            CheckoutStep::Location => {
                if self.coordinates.is_none() {
                    return Err(CheckoutError::LocationUnresolved);
                }
                if self.address.trim().is_empty() {
                    return Err(CheckoutError::MissingAddress);
                }
                CheckoutStep::Payment
            }
            CheckoutStep::Payment if self.payment_method.is_none() => {
                return Err(CheckoutError::MissingPaymentMethod)
            }
            CheckoutStep::Payment => return Err(CheckoutError::ConfirmRequired),
            CheckoutStep::Success => return Err(CheckoutError::Finished),
        };
        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> Result<CheckoutStep, CheckoutError> {
        self.ensure_idle()?;
        let previous = match self.step {
            CheckoutStep::Location => CheckoutStep::Cart,
            CheckoutStep::Payment => CheckoutStep::Location,
            CheckoutStep::Cart => {
                return Err(CheckoutError::InvalidTransition {
                    from: CheckoutStep::Cart,
                    to: CheckoutStep::Cart,
                })
            }
            CheckoutStep::Success => return Err(CheckoutError::Finished),
        };
        self.step = previous;
        Ok(previous)
    }

    /// Edits the address text without resolving coordinates.
    pub fn set_address_label(&mut self, label: impl Into<String>) -> Result<(), CheckoutError> {
        self.ensure_step(CheckoutStep::Location)?;
        self.address = label.into();
        Ok(())
    }

    pub fn resolve_location(
        &mut self,
        label: impl Into<String>,
        coordinates: Coordinates,
    ) -> Result<(), CheckoutError> {
        self.ensure_step(CheckoutStep::Location)?;
        let coordinates = Coordinates::new(coordinates.lat, coordinates.lng)?;
        self.address = label.into();
        self.coordinates = Some(coordinates);
        Ok(())
    }

    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.ensure_step(CheckoutStep::Payment)?;
        self.payment_method = Some(method);
        Ok(())
    }

    /// Checks the confirm preconditions, snapshots `cart` into the ticket and
    /// marks the session as processing.
    pub fn begin_confirm(&mut self, cart: CartSummary) -> Result<ConfirmTicket, CheckoutError> {
        self.ensure_step(CheckoutStep::Payment)?;
        self.ensure_idle()?;
        let payment_method = self
            .payment_method
            .ok_or(CheckoutError::MissingPaymentMethod)?;
        let destination = self.coordinates.ok_or(CheckoutError::LocationUnresolved)?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.processing = true;
        Ok(ConfirmTicket {
            cart_id: self.cart_id,
            lines: cart.lines,
            delivery_fee: cart.delivery_fee,
            payment_method,
            destination,
            address: self.address.clone(),
        })
    }

    pub fn finish_confirm(&mut self, order_id: OrderId) -> Result<(), CheckoutError> {
        if !self.processing {
            return Err(CheckoutError::NotProcessing);
        }
        self.processing = false;
        self.order_id = Some(order_id);
        self.step = CheckoutStep::Success;
        Ok(())
    }

    /// Releases the processing flag after a failed placement; the step stays Payment.
    pub fn abort_confirm(&mut self) {
        self.processing = false;
    }
}
