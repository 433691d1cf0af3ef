//! # Actor Framework
//!
//! Building blocks for resource-oriented actors on tokio.
//!
//! Each resource type gets one [`ResourceActor`] task that owns every instance
//! of that type and serves Create / Get / List / Update / Delete / Action
//! requests one at a time. Callers talk to it through a cloneable
//! [`ResourceClient`]. Because a single task owns the state, entity code never
//! needs a lock, and any sequence of hooks for one message is atomic with
//! respect to other messages.
//!
//! The three layers:
//!
//! 1. **Entity** ([`ActorEntity`]): domain types and their hooks.
//! 2. **Runtime** ([`ResourceActor`]): the message loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed requests and
//!    per-domain error mapping.
//!
//! Hooks run against a copy of the stored entity and the copy is committed only
//! when the hook succeeds, so a rejected update or action leaves the entity as
//! it was.
//!
//! Cross-resource dependencies are injected as the entity's `Context` when the
//! actor is started with [`ResourceActor::run`]. The [`mock`] module provides a
//! scripted actor for testing domain clients, and [`telemetry`] installs the
//! tracing subscriber used by binaries.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod telemetry;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use telemetry::setup_tracing;
