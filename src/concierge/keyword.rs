//! Offline advisor that matches query words against the catalog text.

use super::{AdvisorError, FoodAdvisor, Recommendation};
use crate::model::{average_rating, MenuItem, Restaurant, Review};
use async_trait::async_trait;

/// Words shorter than this are ignored when matching.
const MIN_WORD_LEN: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAdvisor;

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= MIN_WORD_LEN)
        .map(str::to_lowercase)
        .collect()
}

fn score(restaurant: &Restaurant, item: &MenuItem, wanted: &[String]) -> (usize, Vec<String>) {
    let haystack = format!(
        "{} {} {} {}",
        item.name,
        item.description,
        item.category,
        restaurant.cuisine.join(" ")
    )
    .to_lowercase();
    let hits: Vec<String> = wanted
        .iter()
        .filter(|w| haystack.contains(w.as_str()))
        .cloned()
        .collect();
    (hits.len(), hits)
}

#[async_trait]
impl FoodAdvisor for KeywordAdvisor {
    async fn recommend(
        &self,
        catalog: &[Restaurant],
        query: &str,
    ) -> Result<Vec<Recommendation>, AdvisorError> {
        let wanted = words(query);
        let wanted = wanted.as_slice();
        let mut scored: Vec<(usize, Recommendation)> = catalog
            .iter()
            .flat_map(|restaurant| {
                restaurant.menu.iter().filter_map(move |item| {
                    let (hits, matched) = score(restaurant, item, wanted);
                    (hits > 0).then(|| {
                        let reason = format!(
                            "{} at {} matches \"{}\"",
                            item.name,
                            restaurant.name,
                            matched.join("\", \"")
                        );
                        (
                            hits,
                            Recommendation {
                                restaurant_id: restaurant.id,
                                menu_item_id: item.id.clone(),
                                reason,
                            },
                        )
                    })
                })
            })
            .collect();
        // Stable: equal scores keep catalog order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored.into_iter().map(|(_, rec)| rec).collect())
    }

    async fn summarize_reviews(&self, reviews: &[Review]) -> Result<String, AdvisorError> {
        let Some(mean) = average_rating(reviews) else {
            return Err(AdvisorError::Unavailable("nothing to summarize".into()));
        };
        let latest = &reviews[0];
        Ok(format!(
            "Rated {mean:.1}/5 across {} reviews. Most recently {} said: \"{}\"",
            reviews.len(),
            latest.author,
            latest.comment
        ))
    }

    async fn describe_dish(&self, item: &MenuItem) -> Result<String, AdvisorError> {
        if item.description.trim().is_empty() {
            return Err(AdvisorError::Unavailable(format!(
                "no description for {}",
                item.id
            )));
        }
        let calories = item
            .calories
            .map(|kcal| format!(" About {kcal} kcal."))
            .unwrap_or_default();
        Ok(format!("{}: {}.{calories}", item.name, item.description))
    }
}
