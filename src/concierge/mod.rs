//! AI concierge: recommendations, review summaries and dish blurbs.
//!
//! The generative provider sits behind [`FoodAdvisor`]. [`Concierge`] wraps it
//! and never fails: every provider error degrades to a fixed fallback.

pub mod keyword;

pub use keyword::KeywordAdvisor;

use crate::model::{MenuItem, MenuItemId, Restaurant, RestaurantId, Review};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const NO_REVIEWS_SUMMARY: &str = "No reviews yet. Be the first to share your thoughts!";
pub const FALLBACK_REVIEW_SUMMARY: &str =
    "Customers generally enjoy the atmosphere and food quality.";
pub const FALLBACK_DISH_DESCRIPTION: &str = "A delicious choice prepared with fresh ingredients!";

/// Maximum number of recommendations surfaced.
pub const MAX_RECOMMENDATIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub restaurant_id: RestaurantId,
    pub menu_item_id: MenuItemId,
    pub reason: String,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdvisorError {
    #[error("advisor unavailable: {0}")]
    Unavailable(String),

    #[error("advisor response malformed: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait FoodAdvisor: Send + Sync {
    async fn recommend(
        &self,
        catalog: &[Restaurant],
        query: &str,
    ) -> Result<Vec<Recommendation>, AdvisorError>;

    async fn summarize_reviews(&self, reviews: &[Review]) -> Result<String, AdvisorError>;

    async fn describe_dish(&self, item: &MenuItem) -> Result<String, AdvisorError>;
}

/// Decodes a JSON array of `{restaurantId, menuItemId, reason}` objects.
/// A surrounding markdown code fence is tolerated.
pub fn parse_recommendations(text: &str) -> Result<Vec<Recommendation>, AdvisorError> {
    let body = text.trim();
    let body = body
        .strip_prefix("```json")
        .or_else(|| body.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(body);
    serde_json::from_str(body.trim()).map_err(|e| AdvisorError::Malformed(e.to_string()))
}

pub struct Concierge<A> {
    advisor: A,
}

impl<A: FoodAdvisor> Concierge<A> {
    pub fn new(advisor: A) -> Self {
        Self { advisor }
    }

    /// Up to three suggestions that point at real menu items. Empty on a blank
    /// query or any advisor failure.
    pub async fn recommend(&self, catalog: &[Restaurant], query: &str) -> Vec<Recommendation> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let suggestions = match self.advisor.recommend(catalog, query).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(error = %e, "Recommendation failed");
                return Vec::new();
            }
        };
        let total = suggestions.len();
        let resolved: Vec<_> = suggestions
            .into_iter()
            .filter(|s| resolves(catalog, s))
            .take(MAX_RECOMMENDATIONS)
            .collect();
        debug!(total, kept = resolved.len(), "Recommendations resolved");
        resolved
    }

    pub async fn summarize_reviews(&self, reviews: &[Review]) -> String {
        if reviews.is_empty() {
            return NO_REVIEWS_SUMMARY.to_string();
        }
        self.advisor
            .summarize_reviews(reviews)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Review summary failed");
                FALLBACK_REVIEW_SUMMARY.to_string()
            })
    }

    pub async fn describe_dish(&self, item: &MenuItem) -> String {
        self.advisor.describe_dish(item).await.unwrap_or_else(|e| {
            warn!(item = %item.id, error = %e, "Dish description failed");
            FALLBACK_DISH_DESCRIPTION.to_string()
        })
    }
}

fn resolves(catalog: &[Restaurant], suggestion: &Recommendation) -> bool {
    catalog
        .iter()
        .find(|r| r.id == suggestion.restaurant_id)
        .is_some_and(|r| r.menu_item(&suggestion.menu_item_id).is_some())
}

/// Issued to each request made through a [`Latest`] slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Keeps only the result of the most recent request.
///
/// Each request takes a [`Ticket`]; a response is stored only if no newer
/// ticket has been issued since, so a slow stale answer cannot overwrite a
/// fresher one.
#[derive(Debug)]
pub struct Latest<T> {
    issued: u64,
    value: Option<T>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            value: None,
        }
    }
}

impl<T> Latest<T> {
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Stores `value` if `ticket` is the newest. Returns whether it was kept.
    pub fn offer(&mut self, ticket: Ticket, value: T) -> bool {
        if ticket.0 == self.issued {
            self.value = Some(value);
            true
        } else {
            debug!(ticket = ticket.0, newest = self.issued, "Discarding stale result");
            false
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }
}
