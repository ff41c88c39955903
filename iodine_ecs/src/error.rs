//! Error types of component storage.

use thiserror::Error;

use crate::{ComponentId, Entity};

/// Result of any storage operation which can fail.
pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable misuse of entities, stores or the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("entity {entity} already has component of type `{component}`")]
    AlreadyAttached {
        entity: Entity,
        component: &'static str,
    },

    #[error("entity {entity} does not have component of type `{component}`")]
    Missing {
        entity: Entity,
        component: &'static str,
    },

    #[error("component type mismatch: store holds `{expected}`, accessed as `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("component type `{0}` is not registered")]
    Unregistered(&'static str),

    #[error("no component store registered with ID {0}")]
    UnknownId(ComponentId),

    #[error("entity {0} is not alive")]
    DeadEntity(Entity),
}
