use crate::model::ReviewError;
use thiserror::Error;

/// Errors raised by the catalog (restaurant actor and catalog loading).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Restaurant not found: {0}")]
    NotFound(String),

    #[error("Menu item {item} not found at {restaurant}")]
    MenuItemNotFound { restaurant: String, item: String },

    #[error(transparent)]
    InvalidReview(#[from] ReviewError),

    #[error("Invalid catalog entry: {0}")]
    InvalidEntry(String),

    #[error("Catalog data could not be loaded: {0}")]
    Load(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
