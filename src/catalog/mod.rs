//! Catalog queries: category / text filtering and sorting.
//!
//! These are pure functions over a snapshot of the catalog so they can run on
//! whatever [`CatalogClient::list`](crate::clients::CatalogClient) returned,
//! without another round trip to the actor.

pub mod seed;

use crate::model::Restaurant;
use indexmap::IndexSet;

/// Category value that matches every restaurant.
pub const ALL: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Catalog order.
    #[default]
    None,
    /// Highest aggregate rating first.
    Rating,
    /// Lowest advertised minimum delivery time first.
    Speed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: String,
    pub search: String,
    pub sort: SortBy,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            category: ALL.to_string(),
            search: String::new(),
            sort: SortBy::None,
        }
    }
}

impl CatalogQuery {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn sort(mut self, sort: SortBy) -> Self {
        self.sort = sort;
        self
    }
}

fn matches(restaurant: &Restaurant, category: &str, needle: &str) -> bool {
    let in_category = category == ALL || restaurant.cuisine.iter().any(|c| c == category);
    let in_text = needle.is_empty()
        || restaurant.name.to_lowercase().contains(needle)
        || restaurant
            .cuisine
            .iter()
            .any(|c| c.to_lowercase().contains(needle));
    in_category && in_text
}

/// Restaurants tagged with `category` (or all of them for [`ALL`]) whose name or
/// cuisine contains `search`, case-insensitively. Keeps input order.
pub fn filter(restaurants: &[Restaurant], category: &str, search: &str) -> Vec<Restaurant> {
    let needle = search.trim().to_lowercase();
    restaurants
        .iter()
        .filter(|r| matches(r, category, &needle))
        .cloned()
        .collect()
}

/// Stable sort; ties keep their input order.
pub fn sort(mut restaurants: Vec<Restaurant>, by: SortBy) -> Vec<Restaurant> {
    match by {
        SortBy::None => {}
        SortBy::Rating => restaurants.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortBy::Speed => restaurants.sort_by_key(|r| r.delivery_window.min_minutes),
    }
    restaurants
}

pub fn browse(restaurants: &[Restaurant], query: &CatalogQuery) -> Vec<Restaurant> {
    sort(filter(restaurants, &query.category, &query.search), query.sort)
}

/// [`ALL`] followed by every cuisine tag in first-seen order.
pub fn categories(restaurants: &[Restaurant]) -> Vec<String> {
    let mut tags: IndexSet<&str> = IndexSet::new();
    tags.insert(ALL);
    for restaurant in restaurants {
        tags.extend(restaurant.cuisine.iter().map(String::as_str));
    }
    tags.into_iter().map(str::to_string).collect()
}
