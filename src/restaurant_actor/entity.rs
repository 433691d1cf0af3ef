//! [`ActorEntity`] implementation for [`Restaurant`].

use super::{CatalogError, RestaurantAction, ReviewReceipt};
use crate::model::{Restaurant, RestaurantCreate, RestaurantId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;

#[async_trait]
impl ActorEntity for Restaurant {
    type Id = RestaurantId;
    type Create = RestaurantCreate;
    type Update = ();
    type Action = RestaurantAction;
    type ActionResult = ReviewReceipt;
    type Context = ();
    type Error = CatalogError;

    fn from_create_params(id: RestaurantId, params: RestaurantCreate) -> Result<Self, CatalogError> {
        validate(&params)?;
        Ok(Restaurant::new(id, params))
    }

    async fn handle_action(
        &mut self,
        action: RestaurantAction,
        _ctx: &(),
    ) -> Result<ReviewReceipt, CatalogError> {
        match action {
            RestaurantAction::AddReview(draft) => {
                let review = self.add_review(draft, Utc::now().date_naive())?;
                Ok(ReviewReceipt {
                    review,
                    rating: self.rating,
                })
            }
        }
    }
}

fn validate(params: &RestaurantCreate) -> Result<(), CatalogError> {
    let invalid = |msg: String| Err(CatalogError::InvalidEntry(msg));

    if params.name.trim().is_empty() {
        return invalid("restaurant name is blank".into());
    }
    if !params.location.is_finite() {
        return invalid(format!("{} has a non-finite location", params.name));
    }
    let mut seen = HashSet::new();
    for entry in &params.menu {
        if !seen.insert(&entry.id) {
            return invalid(format!("{} lists menu item {} twice", params.name, entry.id));
        }
        if !(entry.price.is_finite() && entry.price > 0.0) {
            return invalid(format!("{} has price {}", entry.id, entry.price));
        }
        if !(0.0..=5.0).contains(&entry.rating) {
            return invalid(format!("{} has rating {}", entry.id, entry.rating));
        }
    }
    if let Some(review) = params.reviews.iter().find(|r| !(1..=5).contains(&r.rating)) {
        return invalid(format!("{} has a review rated {}", params.name, review.rating));
    }
    Ok(())
}
