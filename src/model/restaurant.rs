//! Catalog entries: restaurants, their menus and reviews.

use crate::model::Coordinates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Type-safe identifier for Restaurants, displayed as `res-{n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RestaurantId(pub u32);

impl From<u32> for RestaurantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "res-{}", self.0)
    }
}

impl FromStr for RestaurantId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix("res-")
            .and_then(|n| n.parse().ok())
            .map(Self)
            .ok_or_else(|| format!("invalid restaurant id: {s:?}"))
    }
}

impl TryFrom<String> for RestaurantId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RestaurantId> for String {
    fn from(id: RestaurantId) -> Self {
        id.to_string()
    }
}

/// Menu item identifier as published in the catalog data (e.g. `m-1-2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub String);

impl MenuItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Advertised delivery range, written `20-30 min` in catalog data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeliveryWindow {
    pub min_minutes: u32,
    pub max_minutes: u32,
}

impl Display for DeliveryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} min", self.min_minutes, self.max_minutes)
    }
}

impl FromStr for DeliveryWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let range = s.trim().trim_end_matches("min").trim();
        let (min, max) = range.split_once('-').unwrap_or((range, range));
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid delivery window: {s:?}"))
        };
        let (min_minutes, max_minutes) = (parse(min)?, parse(max)?);
        if min_minutes > max_minutes {
            return Err(format!("delivery window is reversed: {s:?}"));
        }
        Ok(Self {
            min_minutes,
            max_minutes,
        })
    }
}

impl TryFrom<String> for DeliveryWindow {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DeliveryWindow> for String {
    fn from(window: DeliveryWindow) -> Self {
        window.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub rating: f64,
    pub image: String,
    pub calories: Option<u32>,
}

/// Menu item as it appears in catalog data, before it is bound to a restaurant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub image: String,
    pub calories: Option<u32>,
}

impl MenuEntry {
    fn bind(self, restaurant_id: RestaurantId) -> MenuItem {
        MenuItem {
            id: self.id,
            restaurant_id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            rating: self.rating,
            image: self.image,
            calories: self.calories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(alias = "userName")]
    pub author: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

/// User input for a new review; id and date are assigned on submission.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub author: String,
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    #[error("review comment must not be blank")]
    BlankComment,
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<(), ReviewError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ReviewError::RatingOutOfRange(self.rating));
        }
        if self.comment.trim().is_empty() {
            return Err(ReviewError::BlankComment);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub image: String,
    pub rating: f64,
    pub delivery_window: DeliveryWindow,
    pub cuisine: Vec<String>,
    pub menu: Vec<MenuItem>,
    /// Newest first.
    pub reviews: Vec<Review>,
    pub featured: bool,
    pub location: Coordinates,
}

/// Payload for loading a restaurant into the catalog.
///
/// `rating` only matters while `reviews` is empty; otherwise the aggregate is
/// recomputed from the reviews on load.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreate {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "deliveryTime")]
    pub delivery_window: DeliveryWindow,
    pub cuisine: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub location: Coordinates,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub menu: Vec<MenuEntry>,
}

impl Restaurant {
    pub fn new(id: RestaurantId, params: RestaurantCreate) -> Self {
        let rating = average_rating(&params.reviews).unwrap_or(params.rating);
        Self {
            id,
            name: params.name,
            image: params.image,
            rating,
            delivery_window: params.delivery_window,
            cuisine: params.cuisine,
            menu: params.menu.into_iter().map(|entry| entry.bind(id)).collect(),
            reviews: params.reviews,
            featured: params.featured,
            location: params.location,
        }
    }

    pub fn menu_item(&self, item_id: &MenuItemId) -> Option<&MenuItem> {
        self.menu.iter().find(|item| &item.id == item_id)
    }

    /// Prepends a review and recomputes the aggregate rating.
    pub fn add_review(&mut self, draft: ReviewDraft, today: NaiveDate) -> Result<Review, ReviewError> {
        draft.validate()?;
        let review = Review {
            id: Uuid::new_v4(),
            author: draft.author.trim().to_string(),
            rating: draft.rating,
            comment: draft.comment.trim().to_string(),
            date: today,
        };
        self.reviews.insert(0, review.clone());
        if let Some(rating) = average_rating(&self.reviews) {
            self.rating = rating;
        }
        Ok(review)
    }

    /// Review counts per star, index 0 holding 5-star reviews down to index 4 for 1-star.
    pub fn rating_breakdown(&self) -> [usize; 5] {
        let mut counts = [0; 5];
        for review in &self.reviews {
            if let Some(slot) = 5usize.checked_sub(review.rating as usize) {
                if let Some(count) = counts.get_mut(slot) {
                    *count += 1;
                }
            }
        }
        counts
    }
}

/// Mean of the ratings rounded to one decimal, `None` for an empty set.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(sum) / reviews.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8) -> Review {
        Review {
            id: Uuid::new_v4(),
            author: "Sam".into(),
            rating,
            comment: "fine".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    fn restaurant(reviews: Vec<Review>, rating: f64) -> Restaurant {
        Restaurant::new(
            RestaurantId(1),
            RestaurantCreate {
                name: "Gourmet Grill".into(),
                image: String::new(),
                rating,
                delivery_window: "20-30 min".parse().unwrap(),
                cuisine: vec!["Burgers".into()],
                featured: false,
                location: Coordinates { lat: 0.0, lng: 0.0 },
                reviews,
                menu: vec![MenuEntry {
                    id: MenuItemId::new("m-1-1"),
                    name: "Burger".into(),
                    description: String::new(),
                    price: 18.99,
                    category: "Main".into(),
                    rating: 4.9,
                    image: String::new(),
                    calories: Some(850),
                }],
            },
        )
    }

    #[test]
    fn ids_round_trip_through_text() {
        assert_eq!("res-3".parse::<RestaurantId>().unwrap(), RestaurantId(3));
        assert_eq!(RestaurantId(3).to_string(), "res-3");
        assert!("restaurant-3".parse::<RestaurantId>().is_err());
    }

    #[test]
    fn delivery_window_parsing() {
        let window: DeliveryWindow = "15-25 min".parse().unwrap();
        assert_eq!((window.min_minutes, window.max_minutes), (15, 25));
        assert_eq!(window.to_string(), "15-25 min");
        assert_eq!("30 min".parse::<DeliveryWindow>().unwrap().max_minutes, 30);
        assert!("45-35 min".parse::<DeliveryWindow>().is_err());
        assert!("soon".parse::<DeliveryWindow>().is_err());
    }

    #[test]
    fn seeded_rating_kept_without_reviews() {
        assert_eq!(restaurant(vec![], 4.6).rating, 4.6);
        assert_eq!(restaurant(vec![review(5), review(4)], 4.6).rating, 4.5);
    }

    #[test]
    fn menu_items_are_bound_to_their_restaurant() {
        let r = restaurant(vec![], 4.0);
        let item = r.menu_item(&MenuItemId::new("m-1-1")).unwrap();
        assert_eq!(item.restaurant_id, RestaurantId(1));
        assert!(r.menu_item(&MenuItemId::new("m-9-9")).is_none());
    }

    #[test]
    fn adding_review_recomputes_mean() {
        let mut r = restaurant(vec![review(5), review(5), review(5), review(4)], 0.0);
        assert_eq!(r.rating, 4.8);

        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let added = r
            .add_review(
                ReviewDraft {
                    author: "Kim".into(),
                    rating: 3,
                    comment: "  slow delivery ".into(),
                },
                today,
            )
            .unwrap();

        assert_eq!(r.rating, 4.4);
        assert_eq!(r.reviews.len(), 5);
        assert_eq!(r.reviews[0], added);
        assert_eq!(added.comment, "slow delivery");
        assert_eq!(added.date, today);
    }

    #[test]
    fn invalid_reviews_are_rejected() {
        let mut r = restaurant(vec![], 4.0);
        let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let draft = |rating, comment: &str| ReviewDraft {
            author: "Kim".into(),
            rating,
            comment: comment.into(),
        };

        assert_eq!(
            r.add_review(draft(0, "ok"), today),
            Err(ReviewError::RatingOutOfRange(0))
        );
        assert_eq!(
            r.add_review(draft(6, "ok"), today),
            Err(ReviewError::RatingOutOfRange(6))
        );
        assert_eq!(r.add_review(draft(4, "   "), today), Err(ReviewError::BlankComment));
        assert!(r.reviews.is_empty());
        assert_eq!(r.rating, 4.0);
    }

    #[test]
    fn breakdown_counts_per_star() {
        let r = restaurant(vec![review(5), review(4), review(5), review(3)], 0.0);
        assert_eq!(r.rating_breakdown(), [2, 1, 1, 0, 0]);
    }
}
