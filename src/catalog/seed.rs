//! Catalog data files.
//!
//! A catalog file is a JSON object with a `restaurants` array; ids are assigned
//! in array order (`res-1`, `res-2`, ...) when the entries are loaded into the
//! restaurant actor.

use crate::model::RestaurantCreate;
use crate::restaurant_actor::CatalogError;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

const DEMO_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    restaurants: Vec<RestaurantCreate>,
}

pub fn from_json(text: &str) -> Result<Vec<RestaurantCreate>, CatalogError> {
    serde_json::from_str::<CatalogFile>(text)
        .map(|file| file.restaurants)
        .map_err(|e| CatalogError::Load(e.to_string()))
}

/// The four-restaurant catalog bundled with the crate.
pub fn demo_catalog() -> Result<Vec<RestaurantCreate>, CatalogError> {
    from_json(DEMO_CATALOG)
}

pub fn from_path(path: &Path) -> Result<Vec<RestaurantCreate>, CatalogError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::Load(format!("{}: {e}", path.display())))?;
    from_json(&text)
}

/// Reads `path` when given, otherwise the bundled demo catalog.
pub fn load(path: Option<&Path>) -> Result<Vec<RestaurantCreate>, CatalogError> {
    let restaurants = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading catalog file");
            from_path(path)?
        }
        None => {
            info!("Loading bundled demo catalog");
            demo_catalog()?
        }
    };
    info!(count = restaurants.len(), "Catalog parsed");
    Ok(restaurants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_parses() {
        let restaurants = demo_catalog().unwrap();
        let names: Vec<_> = restaurants.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["Gourmet Grill", "Sushi Zen", "Pasta Palace", "Taco Haven"]
        );
        assert!(restaurants[0].featured);
        assert_eq!(restaurants[0].delivery_window.to_string(), "20-30 min");
        assert_eq!(restaurants[0].menu.len(), 3);
        assert_eq!(restaurants[0].reviews.len(), 4);
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        assert!(matches!(from_json("{\"restaurants\": 3}"), Err(CatalogError::Load(_))));
        assert!(matches!(
            from_path(Path::new("/definitely/not/here.json")),
            Err(CatalogError::Load(msg)) if msg.contains("not/here.json")
        ));
    }
}
