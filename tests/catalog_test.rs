use food_order::catalog::{CatalogQuery, SortBy};
use food_order::clients::CatalogClient;
use food_order::model::{MenuItemId, RestaurantId, ReviewDraft, ReviewError};
use food_order::restaurant_actor::CatalogError;

async fn demo_catalog() -> (CatalogClient, tokio::task::JoinHandle<()>) {
    let (actor, client) = food_order::restaurant_actor::new();
    let handle = tokio::spawn(actor.run(()));
    let catalog = CatalogClient::new(client);
    let restaurants = food_order::catalog::seed::demo_catalog().unwrap();
    let ids = catalog.load(restaurants).await.unwrap();
    assert_eq!(ids, (1..=4).map(RestaurantId).collect::<Vec<_>>());
    (catalog, handle)
}

fn draft(rating: u8, comment: &str) -> ReviewDraft {
    ReviewDraft {
        author: "Sam".to_string(),
        rating,
        comment: comment.to_string(),
    }
}

#[tokio::test]
async fn test_browse_filters_and_sorts() {
    let (catalog, handle) = demo_catalog().await;

    let by_rating = catalog
        .browse(&CatalogQuery::default().sort(SortBy::Rating))
        .await
        .unwrap();
    let names: Vec<_> = by_rating.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        ["Sushi Zen", "Gourmet Grill", "Taco Haven", "Pasta Palace"]
    );

    let fastest = catalog
        .browse(&CatalogQuery::default().sort(SortBy::Speed))
        .await
        .unwrap();
    assert_eq!(fastest[0].name, "Taco Haven");

    let sushi = catalog
        .browse(&CatalogQuery::default().category("Sushi"))
        .await
        .unwrap();
    assert_eq!(sushi.len(), 1);
    assert_eq!(sushi[0].id, RestaurantId(2));

    let searched = catalog
        .browse(&CatalogQuery::default().search("  PASTA "))
        .await
        .unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].name, "Pasta Palace");

    assert!(catalog
        .browse(&CatalogQuery::default().category("Sushi").search("taco"))
        .await
        .unwrap()
        .is_empty());

    drop(catalog);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_menu_lookup_and_origin() {
    let (catalog, handle) = demo_catalog().await;

    let item = catalog
        .find_menu_item(RestaurantId(2), &MenuItemId::new("m-2-1"))
        .await
        .unwrap();
    assert_eq!(item.name, "Dragon Roll");
    assert_eq!(item.restaurant_id, RestaurantId(2));

    assert!(matches!(
        catalog
            .find_menu_item(RestaurantId(2), &MenuItemId::new("m-1-1"))
            .await,
        Err(CatalogError::MenuItemNotFound { .. })
    ));
    assert!(matches!(
        catalog.origin_of(RestaurantId(9)).await,
        Err(CatalogError::NotFound(_))
    ));

    let origin = catalog.origin_of(RestaurantId(3)).await.unwrap();
    assert_eq!((origin.lat, origin.lng), (40.7061, -73.9969));

    drop(catalog);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_review_updates_rating_and_breakdown() {
    let (catalog, handle) = demo_catalog().await;

    let before = catalog.restaurant(RestaurantId(1)).await.unwrap();
    assert_eq!(before.rating, 4.3);
    assert_eq!(before.rating_breakdown(), [2, 1, 1, 0, 0]);

    let receipt = catalog
        .add_review(RestaurantId(1), draft(5, "  Great burger  "))
        .await
        .unwrap();
    assert_eq!(receipt.rating, 4.4);
    assert_eq!(receipt.review.comment, "Great burger");

    let after = catalog.restaurant(RestaurantId(1)).await.unwrap();
    assert_eq!(after.rating, 4.4);
    assert_eq!(after.reviews.len(), 5);
    assert_eq!(after.reviews[0].id, receipt.review.id);
    assert_eq!(after.rating_breakdown(), [3, 1, 1, 0, 0]);

    drop(catalog);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_invalid_review_changes_nothing() {
    let (catalog, handle) = demo_catalog().await;

    assert_eq!(
        catalog
            .add_review(RestaurantId(2), draft(6, "Too good"))
            .await
            .unwrap_err()
            .to_string(),
        CatalogError::InvalidReview(ReviewError::RatingOutOfRange(6)).to_string()
    );
    assert!(matches!(
        catalog.add_review(RestaurantId(2), draft(4, "   ")).await,
        Err(CatalogError::InvalidReview(ReviewError::BlankComment))
    ));
    assert!(matches!(
        catalog.add_review(RestaurantId(7), draft(4, "Fine")).await,
        Err(CatalogError::NotFound(_))
    ));

    let sushi = catalog.restaurant(RestaurantId(2)).await.unwrap();
    assert_eq!(sushi.reviews.len(), 2);
    assert_eq!(sushi.rating, 4.5);

    drop(catalog);
    handle.await.unwrap();
}
