use actor_framework::mock::{Call, MockClient};
use actor_framework::FrameworkError;
use food_order::cart_actor::CartAction;
use food_order::checkout_actor::{CheckoutContext, CheckoutError};
use food_order::clients::{CartClient, CatalogClient, CheckoutClient, OrderClient};
use food_order::config::AppConfig;
use food_order::events::{UiEvent, UiNotifier};
use food_order::location::FixedGeolocator;
use food_order::model::{
    Cart, CartId, CheckoutStep, Coordinates, MenuItem, MenuItemId, Order, OrderId, OrderLine,
    PaymentMethod, Restaurant, RestaurantId,
};
use std::sync::Arc;

const SHOPPER: Coordinates = Coordinates {
    lat: 40.7484,
    lng: -73.9857,
};

fn cart_with_fries(id: CartId) -> Cart {
    let mut cart = Cart::new(id, 2.99);
    cart.add(&MenuItem {
        id: MenuItemId::new("m-1-2"),
        restaurant_id: RestaurantId(1),
        name: "Crispy Sweet Potato Fries".to_string(),
        description: String::new(),
        price: 6.99,
        category: "Sides".to_string(),
        rating: 4.6,
        image: String::new(),
        calories: None,
    });
    cart
}

struct Harness {
    cart_mock: MockClient<Cart>,
    order_mock: MockClient<Order>,
    catalog_mock: MockClient<Restaurant>,
    checkout: CheckoutClient,
    ui: UiNotifier,
    fallback: Coordinates,
    actor_handle: tokio::task::JoinHandle<()>,
}

/// Real checkout actor; cart, ledger and catalog are mocked.
fn harness() -> Harness {
    let cart_mock = MockClient::<Cart>::new();
    let order_mock = MockClient::<Order>::new();
    let catalog_mock = MockClient::<Restaurant>::new();
    let config = AppConfig::default();
    let ui = UiNotifier::default();

    let cart = CartClient::new(cart_mock.client());
    let (checkout_actor, checkout_client) = food_order::checkout_actor::new();
    let actor_handle = tokio::spawn(checkout_actor.run(CheckoutContext {
        cart: cart.clone(),
        geolocator: Arc::new(FixedGeolocator(SHOPPER)),
        fallback_location: config.default_location,
    }));

    let checkout = CheckoutClient::new(
        checkout_client,
        cart,
        OrderClient::new(order_mock.client()),
        CatalogClient::new(catalog_mock.client()),
        ui.clone(),
        config.checkout_settings(),
    );

    Harness {
        cart_mock,
        order_mock,
        catalog_mock,
        checkout,
        ui,
        fallback: config.default_location,
        actor_handle,
    }
}

/// Pattern 2: Actor + Mocks
/// The real checkout actor runs its step machine while every collaborator is
/// scripted, so the test sees exactly which requests confirm sends.
#[tokio::test(start_paused = true)]
async fn test_confirm_with_mocked_collaborators() {
    let h = harness();
    let cart_id = CartId(7);
    let mut ui = h.ui.subscribe();

    // open + advance read the cart, confirm snapshots it and then takes the
    // ordered lines out.
    h.cart_mock.expect_get().return_ok(Some(cart_with_fries(cart_id)));
    h.cart_mock.expect_get().return_ok(Some(cart_with_fries(cart_id)));
    h.cart_mock.expect_get().return_ok(Some(cart_with_fries(cart_id)));
    h.cart_mock
        .expect_action()
        .return_ok(Cart::new(cart_id, 2.99).summary());

    // Unknown restaurant: delivery starts from the default location.
    h.catalog_mock.expect_get().return_ok(None);

    let placed = Order::new(
        OrderId(5),
        food_order::model::OrderCreate {
            lines: cart_with_fries(cart_id).lines().map(OrderLine::from).collect(),
            delivery_fee: 2.99,
            payment_method: PaymentMethod::CashOnDelivery,
            origin: h.fallback,
            destination: SHOPPER,
            address: "My Current Location".to_string(),
            placed_at: chrono::Utc::now(),
        },
    );
    h.order_mock.expect_create().return_ok(OrderId(5));
    h.order_mock.expect_get().return_ok(Some(placed.clone()));

    let id = h.checkout.open(cart_id).await.unwrap();
    h.checkout.advance(id).await.unwrap();
    h.checkout.use_current_location(id).await.unwrap();
    h.checkout.advance(id).await.unwrap();
    h.checkout
        .select_payment(id, PaymentMethod::CashOnDelivery)
        .await
        .unwrap();

    let order = h.checkout.confirm(id).await.unwrap();
    assert_eq!(order, placed);

    let session = h.checkout.session(id).await.unwrap();
    assert_eq!(session.step, CheckoutStep::Success);
    assert_eq!(session.order_id, Some(OrderId(5)));

    // What the ledger was asked to store.
    let order_calls = h.order_mock.take_calls();
    match order_calls.as_slice() {
        [Call::Create(params), Call::Get(OrderId(5))] => {
            assert_eq!(params.origin, h.fallback);
            assert_eq!(params.destination, SHOPPER);
            assert_eq!(params.payment_method, PaymentMethod::CashOnDelivery);
            assert_eq!(params.lines.len(), 1);
            assert_eq!(params.lines[0].quantity, 1);
        }
        other => panic!("unexpected ledger calls: {other:?}"),
    }
    let cart_calls = h.cart_mock.take_calls();
    match cart_calls.as_slice() {
        [
            Call::Get(CartId(7)),
            Call::Get(CartId(7)),
            Call::Get(CartId(7)),
            Call::Action(CartId(7), CartAction::RemoveOrdered(lines)),
        ] => {
            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].item_id, MenuItemId::new("m-1-2"));
            assert_eq!(lines[0].quantity, 1);
        }
        other => panic!("unexpected cart calls: {other:?}"),
    }
    assert!(matches!(
        h.catalog_mock.take_calls().as_slice(),
        [Call::Get(RestaurantId(1))]
    ));
    assert_eq!(ui.try_recv().unwrap(), UiEvent::OrderPlaced(placed));

    h.cart_mock.verify();
    h.order_mock.verify();
    h.catalog_mock.verify();

    drop(h.checkout);
    h.actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_cart_failure_blocks_opening() {
    let h = harness();
    h.cart_mock.expect_get().return_err(FrameworkError::ActorClosed);

    assert!(matches!(
        h.checkout.open(CartId(1)).await,
        Err(CheckoutError::Collaborator(_))
    ));
    h.cart_mock.verify();

    drop(h.checkout);
    h.actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_advance_rechecks_cart_contents() {
    let h = harness();
    let cart_id = CartId(3);
    h.cart_mock.expect_get().return_ok(Some(cart_with_fries(cart_id)));
    h.cart_mock.expect_get().return_ok(Some(Cart::new(cart_id, 2.99)));

    let id = h.checkout.open(cart_id).await.unwrap();
    assert_eq!(
        h.checkout.advance(id).await.unwrap_err(),
        CheckoutError::EmptyCart
    );
    assert_eq!(
        h.checkout.session(id).await.unwrap().step,
        CheckoutStep::Cart
    );
    h.cart_mock.verify();

    drop(h.checkout);
    h.actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_confirm_with_emptied_cart_never_starts() {
    let h = harness();
    let cart_id = CartId(4);
    h.cart_mock.expect_get().return_ok(Some(cart_with_fries(cart_id)));
    h.cart_mock.expect_get().return_ok(Some(cart_with_fries(cart_id)));
    h.cart_mock.expect_get().return_ok(Some(Cart::new(cart_id, 2.99)));

    let id = h.checkout.open(cart_id).await.unwrap();
    h.checkout.advance(id).await.unwrap();
    h.checkout.use_current_location(id).await.unwrap();
    h.checkout.advance(id).await.unwrap();
    h.checkout
        .select_payment(id, PaymentMethod::DigitalWallet)
        .await
        .unwrap();

    assert_eq!(h.checkout.confirm(id).await.unwrap_err(), CheckoutError::EmptyCart);
    assert!(!h.checkout.session(id).await.unwrap().processing);

    // Nothing reached the ledger or the catalog.
    assert!(h.order_mock.take_calls().is_empty());
    assert!(h.catalog_mock.take_calls().is_empty());
    h.cart_mock.verify();

    drop(h.checkout);
    h.actor_handle.await.unwrap();
}
