//! Custom actions for checkout sessions.

use crate::model::{CheckoutSession, ConfirmTicket, Coordinates, OrderId, PaymentMethod};

#[derive(Debug, Clone)]
pub enum CheckoutAction {
    Advance,
    Back,
    SetLocation {
        label: String,
        coordinates: Coordinates,
    },
    /// Asks the geolocator, falling back to the default location.
    UseCurrentLocation,
    /// Validates confirm preconditions and raises the processing flag.
    BeginConfirm,
    FinishConfirm(OrderId),
    /// Drops the processing flag after a failed placement.
    AbortConfirm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutActionResult {
    Session(CheckoutSession),
    /// Reply to [`CheckoutAction::BeginConfirm`].
    Confirming(ConfirmTicket),
}

/// Form edits. Each field is only accepted at the step that shows it.
#[derive(Debug, Clone, Default)]
pub struct CheckoutUpdate {
    pub address_label: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}
