//! Utilities for managing component storages.

use std::collections::hash_map::{Entry, HashMap};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use anymap2::{any::CloneAnySendSync, Map};

use super::{Component, ComponentId, Dashboard, IdGenerator, Storage};
use crate::{Entity, Error, Result};

/// Remembers which ID was given to component type `T`.
struct TypeSlot<T> {
    id: ComponentId,
    marker: PhantomData<fn() -> T>,
}

impl<T> Clone for TypeSlot<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            marker: PhantomData,
        }
    }
}

/// Manager of all component storages of one world.
///
/// Every component type must be registered before use;
/// registration creates exactly one [`Storage`] for the type.
///
pub struct Registry {
    generator: Arc<IdGenerator>,
    types: Map<dyn CloneAnySendSync + Send + Sync>,
    stores: HashMap<ComponentId, Box<dyn Dashboard>>,
    capacity: usize,
}

impl Registry {
    /// Creates new registry which takes IDs from [`IdGenerator::global`].
    pub fn new() -> Self {
        Self::with_generator(IdGenerator::global())
    }

    /// Creates new registry which takes IDs from the given generator.
    pub fn with_generator(generator: Arc<IdGenerator>) -> Self {
        Self {
            generator,
            types: Map::new(),
            stores: HashMap::new(),
            capacity: 0,
        }
    }

    /// Sets initial capacity of storages created by subsequent registrations.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Registers component type `T` and returns its ID.
    ///
    /// Registration is idempotent:
    /// registering the same type again returns the same ID and keeps the existing storage.
    ///
    pub fn register<T>(&mut self) -> ComponentId
    where
        T: Component,
    {
        if let Some(slot) = self.types.get::<TypeSlot<T>>() {
            log::warn!(
                "component `{}` already registered with ID {}",
                T::reflect(),
                slot.id,
            );
            return slot.id;
        }

        let id = self.generator.generate();
        self.types.insert(TypeSlot::<T> {
            id,
            marker: PhantomData,
        });
        match self.stores.entry(id) {
            Entry::Occupied(entry) => {
                log::warn!(
                    "component ID {} is already taken by `{}`",
                    id,
                    entry.get().component_type(),
                );
            }
            Entry::Vacant(entry) => {
                entry.insert(Box::new(Storage::<T>::with_capacity(self.capacity)));
                let ty = T::reflect();
                log::debug!(
                    "registered component `{}` ({} bytes, align {}) with ID {}",
                    ty,
                    ty.size(),
                    ty.align(),
                    id,
                );
            }
        }
        id
    }

    /// Returns ID of component type `T`, if it was registered.
    pub fn id_of<T>(&self) -> Option<ComponentId>
    where
        T: Component,
    {
        self.types.get::<TypeSlot<T>>().map(|slot| slot.id)
    }

    /// Returns `true` if component type `T` was registered.
    pub fn contains<T>(&self) -> bool
    where
        T: Component,
    {
        self.id_of::<T>().is_some()
    }

    /// Retrieves type-erased storage by its ID.
    pub fn lookup(&self, id: ComponentId) -> Option<&dyn Dashboard> {
        self.stores.get(&id).map(|store| &**store)
    }

    /// Retrieves mutable type-erased storage by its ID.
    pub fn lookup_mut(&mut self, id: ComponentId) -> Option<&mut dyn Dashboard> {
        self.stores.get_mut(&id).map(|store| &mut **store)
    }

    /// Retrieves type-erased storage by its ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownId`] if no storage was registered with this ID.
    ///
    pub fn try_lookup(&self, id: ComponentId) -> Result<&dyn Dashboard> {
        self.lookup(id).ok_or(Error::UnknownId(id))
    }

    /// Retrieves storage of component type `T`.
    pub fn storage<T>(&self) -> Option<&Storage<T>>
    where
        T: Component,
    {
        let id = self.id_of::<T>()?;
        self.lookup(id)?.as_storage()
    }

    /// Retrieves mutable storage of component type `T`.
    pub fn storage_mut<T>(&mut self) -> Option<&mut Storage<T>>
    where
        T: Component,
    {
        let id = self.id_of::<T>()?;
        self.lookup_mut(id)?.as_storage_mut()
    }

    /// Detaches components of every type from the entity.
    ///
    /// Returns count of removed components.
    ///
    pub fn detach_all(&mut self, entity: Entity) -> usize {
        self.stores
            .values_mut()
            .filter(|store| store.contains(entity))
            .map(|store| store.remove(entity))
            .filter(|removed| *removed)
            .count()
    }

    /// Returns iterator over IDs of all registered component types.
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.stores.keys().copied()
    }

    /// Returns mutable iterator over all type-erased storages.
    pub fn stores_mut(&mut self) -> impl Iterator<Item = &mut dyn Dashboard> {
        self.stores.values_mut().map(|store| &mut **store)
    }

    /// Number of registered component types.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            types: self.types.clone(),
            stores: self
                .stores
                .iter()
                .map(|(id, store)| (*id, store.boxed_clone()))
                .collect(),
            capacity: self.capacity,
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(
                self.stores
                    .iter()
                    .map(|(id, store)| (id, store.component_type().name())),
            )
            .finish()
    }
}
