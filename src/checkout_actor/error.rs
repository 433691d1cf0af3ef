use crate::model::{CheckoutStep, InvalidCoordinates};
use thiserror::Error;

/// Why a checkout request was refused. A refused request never changes the session.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("The cart is empty")]
    EmptyCart,

    #[error("No delivery location has been resolved")]
    LocationUnresolved,

    #[error("The delivery address is blank")]
    MissingAddress,

    #[error("No payment method selected")]
    MissingPaymentMethod,

    #[error("Orders are placed with confirm, not advance")]
    ConfirmRequired,

    #[error("An order is already being placed")]
    AlreadyProcessing,

    #[error("No order placement is in progress")]
    NotProcessing,

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: CheckoutStep, to: CheckoutStep },

    #[error("Only allowed at {expected}, checkout is at {actual}")]
    WrongStep {
        expected: CheckoutStep,
        actual: CheckoutStep,
    },

    #[error("Checkout already finished")]
    Finished,

    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),

    #[error("Checkout session not found: {0}")]
    NotFound(String),

    /// A cart, catalog or ledger call made on behalf of checkout failed.
    #[error("Checkout dependency failed: {0}")]
    Collaborator(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
