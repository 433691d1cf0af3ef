use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found: {0}")]
    NotFound(String),

    #[error("Delivery fee must be a positive amount, got {0}")]
    InvalidFee(f64),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
