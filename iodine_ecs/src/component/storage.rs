//! Storage for statically typed components of ECS.

use std::any::Any;

use super::{Component, Dashboard, SparseSet};
use crate::{Entity, Error, Result, Type};

/// Storage for statically typed components of ECS.
#[derive(Debug, Clone)]
pub struct Storage<T>
where
    T: Component,
{
    /// Components are actually stored here.
    components: SparseSet<T>,
    ty: &'static Type,
}

impl<T> Default for Storage<T>
where
    T: Component,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Storage<T>
where
    T: Component,
{
    /// Creates an empty component storage.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty component storage with space for `capacity` entities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            components: SparseSet::with_capacity(capacity),
            ty: T::reflect(),
        }
    }

    /// Inserts component and attaches it to the entity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyAttached`] if the entity already has this component;
    /// previously attached component stays untouched.
    ///
    pub fn insert(&mut self, entity: Entity, component: T) -> Result<&mut T> {
        if self.components.contains(entity.index()) {
            log::warn!(
                "entity {} already has component of type `{}`",
                entity,
                self.ty,
            );
            return Err(Error::AlreadyAttached {
                entity,
                component: self.ty.name(),
            });
        }
        Ok(self.components.emplace(entity.index(), component))
    }

    /// Removes component and detaches it from the entity.
    ///
    /// Returns component that was attached to the entity.
    ///
    pub fn take(&mut self, entity: Entity) -> Option<T> {
        let component = self.components.remove(entity.index());
        if component.is_none() {
            log::warn!(
                "entity {} does not have component of type `{}`",
                entity,
                self.ty,
            );
        }
        component
    }

    /// Returns `true` if component was attached to the entity.
    pub fn contains(&self, entity: Entity) -> bool {
        self.components.contains(entity.index())
    }

    /// Retrieves an immutable reference to component attached to the entity.
    pub fn get(&self, entity: Entity) -> Option<&T> {
        let component = self.components.get(entity.index());
        if component.is_none() {
            log::debug!(
                "entity {} does not have component of type `{}`",
                entity,
                self.ty,
            );
        }
        component
    }

    /// Retrieves a mutable reference to component attached to the entity.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        if !self.contains(entity) {
            log::debug!(
                "entity {} does not have component of type `{}`",
                entity,
                self.ty,
            );
        }
        self.components.get_mut(entity.index())
    }

    /// Number of stored components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns immutable iterator over all entity indices with their components.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.components.iter()
    }
}

impl<T> Dashboard for Storage<T>
where
    T: Component,
{
    fn component_type(&self) -> &'static Type {
        self.ty
    }

    fn contains(&self, entity: Entity) -> bool {
        Storage::contains(self, entity)
    }

    fn len(&self) -> usize {
        Storage::len(self)
    }

    fn remove(&mut self, entity: Entity) -> bool {
        self.take(entity).is_some()
    }

    fn clear(&mut self) {
        self.components.clear()
    }

    fn get_erased(&self, entity: Entity) -> Option<&dyn Any> {
        let component = self.get(entity)?;
        Some(component as &dyn Any)
    }

    fn get_erased_mut(&mut self, entity: Entity) -> Option<&mut dyn Any> {
        let component = self.get_mut(entity)?;
        Some(component as &mut dyn Any)
    }

    fn insert_erased(&mut self, entity: Entity, component: &mut dyn Any) -> Result<()> {
        let slot = match component.downcast_mut::<Option<T>>() {
            Some(slot) => slot,
            None => panic!(
                "component type mismatch: store holds `{}`, inserted value is not `Option<{}>`",
                self.ty, self.ty,
            ),
        };
        if self.contains(entity) {
            log::warn!(
                "entity {} already has component of type `{}`",
                entity,
                self.ty,
            );
            return Err(Error::AlreadyAttached {
                entity,
                component: self.ty.name(),
            });
        }
        let component = match slot.take() {
            Some(component) => component,
            None => panic!(
                "no value of type `{}` was provided to insert into entity {}",
                self.ty, entity,
            ),
        };
        self.components.emplace(entity.index(), component);
        Ok(())
    }

    fn copy_component(&mut self, from: Entity, to: Entity) -> Result<()> {
        let component = match self.components.get(from.index()) {
            Some(component) => component.clone(),
            None => {
                log::warn!(
                    "entity {} does not have component of type `{}` to copy",
                    from,
                    self.ty,
                );
                return Err(Error::Missing {
                    entity: from,
                    component: self.ty.name(),
                });
            }
        };
        self.insert(to, component)?;
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn Dashboard> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
