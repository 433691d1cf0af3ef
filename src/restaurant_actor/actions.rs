//! Custom actions for the Restaurant actor.

use crate::model::{Review, ReviewDraft};

#[derive(Debug, Clone)]
pub enum RestaurantAction {
    /// Validates and prepends a review, then recomputes the aggregate rating.
    AddReview(ReviewDraft),
}

/// Outcome of [`RestaurantAction::AddReview`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewReceipt {
    pub review: Review,
    pub rating: f64,
}
