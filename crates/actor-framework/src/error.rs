//! Errors raised by the framework itself, as opposed to the entities it hosts.

/// Failure of a request sent through a [`ResourceClient`](crate::ResourceClient).
///
/// Transport failures (`ActorClosed`, `ActorDropped`) mean the actor task is gone.
/// `NotFound` is raised by the actor when the id is not in its store. Any error
/// returned by an entity hook travels back boxed inside `EntityError`; use
/// [`FrameworkError::downcast_entity`] to recover the typed value.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,

    #[error("Actor dropped response channel")]
    ActorDropped,

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type from an `EntityError`.
    ///
    /// Returns `Err(self)` untouched for every other variant, or when the boxed
    /// error is of a different type.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}
