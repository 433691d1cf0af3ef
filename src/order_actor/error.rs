use thiserror::Error;

/// Errors raised by the order ledger.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("An order needs at least one line")]
    EmptyOrder,

    #[error("Order validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
