//! # Catalog Client
//!
//! Loading, lookups and review submission against the restaurant actor.
//! Browsing pulls one snapshot and runs the pure [`catalog`](crate::catalog)
//! queries over it.

use crate::catalog::{self, CatalogQuery};
use crate::model::{
    Coordinates, MenuItem, MenuItemId, Restaurant, RestaurantCreate, RestaurantId, ReviewDraft,
};
use crate::restaurant_actor::{CatalogError, RestaurantAction, ReviewReceipt};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{info, instrument};

#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Restaurant>,
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Restaurant>) -> Self {
        Self { inner }
    }

    /// Adds restaurants in order; ids follow that order.
    #[instrument(skip_all, fields(count = restaurants.len()))]
    pub async fn load(
        &self,
        restaurants: Vec<RestaurantCreate>,
    ) -> Result<Vec<RestaurantId>, CatalogError> {
        let mut ids = Vec::with_capacity(restaurants.len());
        for params in restaurants {
            ids.push(self.inner.create(params).await.map_err(Self::map_error)?);
        }
        info!(count = ids.len(), "Catalog loaded");
        Ok(ids)
    }

    #[instrument(skip(self))]
    pub async fn restaurant(&self, id: RestaurantId) -> Result<Restaurant, CatalogError> {
        self.get(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn browse(&self, query: &CatalogQuery) -> Result<Vec<Restaurant>, CatalogError> {
        Ok(catalog::browse(&self.list().await?, query))
    }

    #[instrument(skip(self))]
    pub async fn find_menu_item(
        &self,
        restaurant: RestaurantId,
        item: &MenuItemId,
    ) -> Result<MenuItem, CatalogError> {
        self.restaurant(restaurant)
            .await?
            .menu_item(item)
            .cloned()
            .ok_or_else(|| CatalogError::MenuItemNotFound {
                restaurant: restaurant.to_string(),
                item: item.to_string(),
            })
    }

    /// Where orders from this restaurant start their delivery.
    #[instrument(skip(self))]
    pub async fn origin_of(&self, restaurant: RestaurantId) -> Result<Coordinates, CatalogError> {
        Ok(self.restaurant(restaurant).await?.location)
    }

    #[instrument(skip(self, draft), fields(rating = draft.rating))]
    pub async fn add_review(
        &self,
        restaurant: RestaurantId,
        draft: ReviewDraft,
    ) -> Result<ReviewReceipt, CatalogError> {
        let receipt = self
            .inner
            .perform_action(restaurant, RestaurantAction::AddReview(draft))
            .await
            .map_err(Self::map_error)?;
        info!(%restaurant, rating = receipt.rating, "Review added");
        Ok(receipt)
    }
}

impl ActorClient<Restaurant> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Restaurant> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CatalogError {
        match e {
            FrameworkError::NotFound(id) => CatalogError::NotFound(id),
            other => other
                .downcast_entity::<CatalogError>()
                .unwrap_or_else(|e| CatalogError::ActorCommunicationError(e.to_string())),
        }
    }
}
