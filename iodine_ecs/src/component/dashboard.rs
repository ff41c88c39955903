//! Type-erased interface over storage of one component type.

use std::any::Any;

use crate::{Component, Entity, Error, Result, Type};

/// Interface of component storage which hides the type of its components.
///
/// Typed access goes through the methods of `dyn Dashboard`,
/// which compare the type of the caller with [`Dashboard::component_type`]
/// before trusting any value returned by the untyped primitives.
///
pub trait Dashboard: Any + Send + Sync {
    /// Descriptor of the component type stored here.
    fn component_type(&self) -> &'static Type;

    /// Returns `true` if component is attached to the entity.
    fn contains(&self, entity: Entity) -> bool;

    /// Number of components stored here.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes component and detaches it from the entity.
    ///
    /// Returns `false` if there was nothing to remove.
    ///
    fn remove(&mut self, entity: Entity) -> bool;

    /// Removes all components.
    fn clear(&mut self);

    /// Untyped immutable access to component attached to the entity.
    fn get_erased(&self, entity: Entity) -> Option<&dyn Any>;

    /// Untyped mutable access to component attached to the entity.
    fn get_erased_mut(&mut self, entity: Entity) -> Option<&mut dyn Any>;

    /// Untyped insertion of component.
    ///
    /// `component` must be a `&mut Some(T)` where `T` is the stored type;
    /// the value is taken out of it only if the insertion succeeds.
    ///
    /// # Panics
    ///
    /// Panics if `component` is not `Option<T>` or holds no value.
    ///
    fn insert_erased(&mut self, entity: Entity, component: &mut dyn Any) -> Result<()>;

    /// Attaches copy of component of `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Missing`] if `from` has no component here
    /// and [`Error::AlreadyAttached`] if `to` already has one.
    ///
    fn copy_component(&mut self, from: Entity, to: Entity) -> Result<()>;

    /// Deep copy of this storage with all of its components.
    fn boxed_clone(&self) -> Box<dyn Dashboard>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Dashboard {
    /// Checks that components stored here are of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the store is bound to another type.
    ///
    pub fn check_type<T>(&self) -> Result<()>
    where
        T: Component,
    {
        let expected = self.component_type();
        let found = T::reflect();
        if expected != found {
            return Err(Error::TypeMismatch {
                expected: expected.name(),
                found: found.name(),
            });
        }
        Ok(())
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    ///
    /// # Panics
    ///
    /// Panics if components stored here are not of type `T`.
    ///
    pub fn get<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        self.expect_type::<T>();
        self.get_erased(entity)?.downcast_ref()
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    ///
    /// # Panics
    ///
    /// Panics if components stored here are not of type `T`.
    ///
    pub fn get_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        self.expect_type::<T>();
        self.get_erased_mut(entity)?.downcast_mut()
    }

    /// Inserts component of type `T` and attaches it to the entity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyAttached`] if the entity already has this component;
    /// previously attached component stays untouched.
    ///
    /// # Panics
    ///
    /// Panics if components stored here are not of type `T`.
    ///
    pub fn insert<T>(&mut self, entity: Entity, component: T) -> Result<()>
    where
        T: Component,
    {
        self.expect_type::<T>();
        self.insert_erased(entity, &mut Some(component))
    }

    /// Retrieves storage with the concrete component type.
    pub fn as_storage<T>(&self) -> Option<&super::Storage<T>>
    where
        T: Component,
    {
        self.as_any().downcast_ref()
    }

    /// Retrieves mutable storage with the concrete component type.
    pub fn as_storage_mut<T>(&mut self) -> Option<&mut super::Storage<T>>
    where
        T: Component,
    {
        self.as_any_mut().downcast_mut()
    }

    fn expect_type<T>(&self)
    where
        T: Component,
    {
        if let Err(error) = self.check_type::<T>() {
            panic!("{}", error);
        }
    }
}
