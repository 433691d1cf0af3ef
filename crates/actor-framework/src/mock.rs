//! Scripted stand-in for an actor, for testing domain clients in isolation.
//!
//! Replies are queued up front and served in order. Every request the mock
//! receives is recorded so tests can assert on what the client sent.
//!
//! ```
//! # use actor_framework::*;
//! # use actor_framework::mock::{Call, MockClient};
//! # #[derive(Clone, Debug)]
//! # struct Note;
//! # #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! # struct NoteId(u32);
//! # impl From<u32> for NoteId { fn from(n: u32) -> Self { NoteId(n) } }
//! # impl std::fmt::Display for NoteId {
//! #     fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result { write!(f, "note-{}", self.0) }
//! # }
//! # #[derive(Debug, thiserror::Error)]
//! # #[error("never")]
//! # struct Never;
//! # #[async_trait::async_trait]
//! # impl ActorEntity for Note {
//! #     type Id = NoteId;
//! #     type Create = String;
//! #     type Update = ();
//! #     type Action = ();
//! #     type ActionResult = ();
//! #     type Context = ();
//! #     type Error = Never;
//! #     fn from_create_params(_: NoteId, _: String) -> Result<Self, Never> { Ok(Note) }
//! #     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Never> { Ok(()) }
//! # }
//! # #[tokio::main]
//! # async fn main() {
//! let mock = MockClient::<Note>::new();
//! mock.expect_create().return_ok(NoteId(7));
//!
//! let id = mock.client().create("hello".to_string()).await.unwrap();
//! assert_eq!(id, NoteId(7));
//! assert!(matches!(mock.take_calls().as_slice(), [Call::Create(text)] if text == "hello"));
//! mock.verify();
//! # }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

enum Scripted<T: ActorEntity> {
    Create(Result<T::Id, FrameworkError>),
    Get(Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

/// A request as received by the mock, with its payload.
#[derive(Debug)]
pub enum Call<T: ActorEntity> {
    Create(T::Create),
    Get(T::Id),
    List,
    Update(T::Id, T::Update),
    Delete(T::Id),
    Action(T::Id, T::Action),
}

type Shared<V> = Arc<Mutex<V>>;

fn lock<V>(shared: &Shared<V>) -> MutexGuard<'_, V> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    script: Shared<VecDeque<Scripted<T>>>,
    calls: Shared<Vec<Call<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Spawns the responder task. Must be called inside a tokio runtime.
    ///
    /// A request that does not match the next scripted reply panics the
    /// responder, which surfaces in the client as [`FrameworkError::ActorDropped`]
    /// or [`FrameworkError::ActorClosed`].
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(64);
        let script: Shared<VecDeque<Scripted<T>>> = Arc::default();
        let calls: Shared<Vec<Call<T>>> = Arc::default();

        let handle = {
            let script = script.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                while let Some(request) = receiver.recv().await {
                    let next = lock(&script).pop_front();
                    let record = |call| lock(&calls).push(call);
                    match (request, next) {
                        (ResourceRequest::Create { params, respond_to }, Some(Scripted::Create(r))) => {
                            record(Call::Create(params));
                            let _ = respond_to.send(r);
                        }
                        (ResourceRequest::Get { id, respond_to }, Some(Scripted::Get(r))) => {
                            record(Call::Get(id));
                            let _ = respond_to.send(r);
                        }
                        (ResourceRequest::List { respond_to }, Some(Scripted::List(r))) => {
                            record(Call::List);
                            let _ = respond_to.send(r);
                        }
                        (
                            ResourceRequest::Update {
                                id,
                                update,
                                respond_to,
                            },
                            Some(Scripted::Update(r)),
                        ) => {
                            record(Call::Update(id, update));
                            let _ = respond_to.send(r);
                        }
                        (ResourceRequest::Delete { id, respond_to }, Some(Scripted::Delete(r))) => {
                            record(Call::Delete(id));
                            let _ = respond_to.send(r);
                        }
                        (
                            ResourceRequest::Action {
                                id,
                                action,
                                respond_to,
                            },
                            Some(Scripted::Action(r)),
                        ) => {
                            record(Call::Action(id, action));
                            let _ = respond_to.send(r);
                        }
                        (request, next) => panic!(
                            "mock received {} but the next scripted reply was {}",
                            request_kind(&request),
                            next.as_ref().map_or("nothing", scripted_kind),
                        ),
                    }
                }
            })
        };

        Self {
            client: ResourceClient::new(sender),
            script,
            calls,
            _handle: handle,
        }
    }

    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&self) -> Expectation<T, T::Id> {
        self.expectation(Scripted::Create)
    }

    pub fn expect_get(&self) -> Expectation<T, Option<T>> {
        self.expectation(Scripted::Get)
    }

    pub fn expect_list(&self) -> Expectation<T, Vec<T>> {
        self.expectation(Scripted::List)
    }

    pub fn expect_update(&self) -> Expectation<T, T> {
        self.expectation(Scripted::Update)
    }

    pub fn expect_delete(&self) -> Expectation<T, ()> {
        self.expectation(Scripted::Delete)
    }

    pub fn expect_action(&self) -> Expectation<T, T::ActionResult> {
        self.expectation(Scripted::Action)
    }

    /// Drains the requests received so far.
    pub fn take_calls(&self) -> Vec<Call<T>> {
        std::mem::take(&mut *lock(&self.calls))
    }

    /// Panics if any scripted reply was never consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.script).len();
        assert!(
            remaining == 0,
            "Not all expectations were met. {remaining} remaining"
        );
    }

    fn expectation<R>(&self, wrap: fn(Result<R, FrameworkError>) -> Scripted<T>) -> Expectation<T, R> {
        Expectation {
            script: self.script.clone(),
            wrap,
        }
    }
}

/// Pending reply; finish it with `return_ok` or `return_err`.
#[must_use = "an expectation does nothing until return_ok or return_err is called"]
pub struct Expectation<T: ActorEntity, R> {
    script: Shared<VecDeque<Scripted<T>>>,
    wrap: fn(Result<R, FrameworkError>) -> Scripted<T>,
}

impl<T: ActorEntity, R> Expectation<T, R> {
    pub fn return_ok(self, value: R) {
        lock(&self.script).push_back((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.script).push_back((self.wrap)(Err(error)));
    }
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "Create",
        ResourceRequest::Get { .. } => "Get",
        ResourceRequest::List { .. } => "List",
        ResourceRequest::Update { .. } => "Update",
        ResourceRequest::Delete { .. } => "Delete",
        ResourceRequest::Action { .. } => "Action",
    }
}

fn scripted_kind<T: ActorEntity>(scripted: &Scripted<T>) -> &'static str {
    match scripted {
        Scripted::Create(_) => "Create",
        Scripted::Get(_) => "Get",
        Scripted::List(_) => "List",
        Scripted::Update(_) => "Update",
        Scripted::Delete(_) => "Delete",
        Scripted::Action(_) => "Action",
    }
}
