use actor_framework::mock::{Call, MockClient};
use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceActor, ResourceClient};
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
struct Shelf {
    id: ShelfId,
    label: String,
    slots: u32,
    used: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ShelfId(u32);

impl From<u32> for ShelfId {
    fn from(n: u32) -> Self {
        ShelfId(n)
    }
}

impl fmt::Display for ShelfId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shelf-{}", self.0)
    }
}

#[derive(Debug)]
struct ShelfCreate {
    label: String,
    slots: u32,
}

#[derive(Debug)]
enum ShelfAction {
    Stock(u32),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum ShelfError {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("shelf full: {used}/{slots}")]
    Full { used: u32, slots: u32 },
}

#[async_trait]
impl ActorEntity for Shelf {
    type Id = ShelfId;
    type Create = ShelfCreate;
    type Update = String;
    type Action = ShelfAction;
    type ActionResult = u32;
    type Context = ();
    type Error = ShelfError;

    fn from_create_params(id: ShelfId, params: ShelfCreate) -> Result<Self, ShelfError> {
        if params.label.trim().is_empty() {
            return Err(ShelfError::EmptyLabel);
        }
        Ok(Shelf {
            id,
            label: params.label,
            slots: params.slots,
            used: 0,
        })
    }

    async fn on_update(&mut self, label: String, _ctx: &()) -> Result<(), ShelfError> {
        self.label = label;
        if self.label.is_empty() {
            return Err(ShelfError::EmptyLabel);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ShelfAction, _ctx: &()) -> Result<u32, ShelfError> {
        match action {
            ShelfAction::Stock(n) => {
                // Mutate first so the rollback path is exercised on failure.
                self.used += n;
                if self.used > self.slots {
                    return Err(ShelfError::Full {
                        used: self.used,
                        slots: self.slots,
                    });
                }
                Ok(self.used)
            }
        }
    }
}

struct ShelfClient {
    inner: ResourceClient<Shelf>,
}

impl ActorClient<Shelf> for ShelfClient {
    type Error = String;

    fn inner(&self) -> &ResourceClient<Shelf> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> String {
        e.to_string()
    }
}

fn shelf(label: &str, slots: u32) -> ShelfCreate {
    ShelfCreate {
        label: label.into(),
        slots,
    }
}

#[tokio::test]
async fn lifecycle_keeps_creation_order() {
    let (actor, client) = ResourceActor::<Shelf>::new(8);
    let handle = tokio::spawn(actor.run(()));

    let a = client.create(shelf("dry goods", 4)).await.unwrap();
    let b = client.create(shelf("frozen", 2)).await.unwrap();
    let c = client.create(shelf("produce", 6)).await.unwrap();
    assert_eq!((a, b, c), (ShelfId(1), ShelfId(2), ShelfId(3)));

    client.delete(b).await.unwrap();
    let labels: Vec<_> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.label)
        .collect();
    assert_eq!(labels, ["dry goods", "produce"]);

    let updated = client.update(c, "greens".into()).await.unwrap();
    assert_eq!(updated.label, "greens");

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn failed_action_rolls_back_entity() {
    let (actor, client) = ResourceActor::<Shelf>::new(8);
    tokio::spawn(actor.run(()));
    let id = client.create(shelf("frozen", 2)).await.unwrap();

    assert_eq!(client.perform_action(id, ShelfAction::Stock(2)).await.unwrap(), 2);

    let err = client
        .perform_action(id, ShelfAction::Stock(1))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_entity::<ShelfError>().unwrap(),
        ShelfError::Full { used: 3, slots: 2 }
    );
    assert_eq!(client.get(id).await.unwrap().unwrap().used, 2);
}

#[tokio::test]
async fn failed_update_rolls_back_entity() {
    let (actor, client) = ResourceActor::<Shelf>::new(8);
    tokio::spawn(actor.run(()));
    let id = client.create(shelf("frozen", 2)).await.unwrap();

    assert!(client.update(id, String::new()).await.is_err());
    assert_eq!(client.get(id).await.unwrap().unwrap().label, "frozen");
}

#[tokio::test]
async fn rejected_create_consumes_no_entry() {
    let (actor, client) = ResourceActor::<Shelf>::new(8);
    tokio::spawn(actor.run(()));

    let err = client.create(shelf("  ", 1)).await.unwrap_err();
    assert_eq!(
        err.downcast_entity::<ShelfError>().unwrap(),
        ShelfError::EmptyLabel
    );
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_ids_report_not_found() {
    let (actor, client) = ResourceActor::<Shelf>::new(8);
    tokio::spawn(actor.run(()));

    assert!(client.get(ShelfId(42)).await.unwrap().is_none());
    assert!(matches!(
        client.delete(ShelfId(42)).await,
        Err(FrameworkError::NotFound(id)) if id == "shelf-42"
    ));
    assert!(matches!(
        client.perform_action(ShelfId(42), ShelfAction::Stock(1)).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn closed_actor_is_reported() {
    let (actor, client) = ResourceActor::<Shelf>::new(8);
    drop(actor);
    assert!(matches!(
        client.list().await,
        Err(FrameworkError::ActorClosed)
    ));
}

#[tokio::test]
async fn client_trait_maps_errors() {
    let mock = MockClient::<Shelf>::new();
    mock.expect_get().return_err(FrameworkError::ActorDropped);
    mock.expect_list().return_ok(vec![]);

    let client = ShelfClient {
        inner: mock.client(),
    };
    assert_eq!(
        client.get(ShelfId(1)).await.unwrap_err(),
        "Actor dropped response channel"
    );
    assert!(client.list().await.unwrap().is_empty());

    let calls = mock.take_calls();
    assert!(matches!(calls.as_slice(), [Call::Get(ShelfId(1)), Call::List]));
    mock.verify();
}
