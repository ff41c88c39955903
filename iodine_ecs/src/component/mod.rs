//! Utilities for *components* in ECS.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::Reflect;

pub use dashboard::*;
pub use registry::*;
pub use sparse_set::*;
pub use storage::*;

mod dashboard;
mod registry;
mod sparse_set;
mod storage;

/// Objects of this trait represent *component* of ECS.
///
/// Components should be just plain data: reflectable and copy-constructible.
///
pub trait Component: Reflect + Clone + Send + Sync {}

impl<T> Component for T where T: Reflect + Clone + Send + Sync {}

/// Unique identifier of the registered *component* type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Raw value of the identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

lazy_static::lazy_static! {
    static ref GLOBAL_GENERATOR: Arc<IdGenerator> = Arc::new(IdGenerator::new());
}

/// Monotonic generator of [`ComponentId`]s which never reuses a value.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Creates a generator private to its owner.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Generator shared by the whole process.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_GENERATOR)
    }

    /// Mints the next identifier.
    pub fn generate(&self) -> ComponentId {
        ComponentId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
