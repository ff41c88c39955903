//! Utilities for storage of ECS.

use crate::{Component, ComponentId, Config, Entities, Entity, Error, Registry, Result};

/// Storage for entities and components of one simulation world.
///
/// The world is mutated through `&mut self` only: one writer per tick.
/// Readers running in parallel (e.g. rendering) should work on a [`World::snapshot`].
///
#[derive(Debug, Clone, Default)]
pub struct World {
    config: Config,
    /// Storage for all entities.
    entities: Entities,
    /// Storages of all registered components.
    registry: Registry,
}

impl World {
    /// Creates new world with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates new world with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self::with_registry(config, Registry::new())
    }

    /// Creates new world which keeps its components in the given registry.
    pub fn with_registry(config: Config, registry: Registry) -> Self {
        log::debug!(
            "creating world \"{}\" version {}",
            config.name(),
            config.version(),
        );
        Self {
            entities: Entities::with_capacity(config.capacity()),
            registry: registry.with_capacity(config.capacity()),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Registers component type `T` and returns its ID.
    pub fn register<T>(&mut self) -> ComponentId
    where
        T: Component,
    {
        self.registry.register::<T>()
    }

    /// Creates new entity without components.
    pub fn spawn(&mut self) -> Entity {
        let entity = self.entities.spawn();
        log::trace!("spawned entity {} in \"{}\"", entity, self.config.name());
        entity
    }

    /// Destroys the entity and detaches all of its components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeadEntity`] if the entity is not alive.
    ///
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        self.entities.despawn(entity)?;
        let removed = self.registry.detach_all(entity);
        log::trace!("despawned entity {} with {} components", entity, removed);
        Ok(())
    }

    /// Returns `true` if the entity is alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Inserts component of type `T` and attaches it to the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive, `T` was not registered
    /// or the entity already has component of type `T`.
    ///
    pub fn insert<T>(&mut self, entity: Entity, component: T) -> Result<&mut T>
    where
        T: Component,
    {
        self.check_alive(entity)?;
        let storage = self
            .registry
            .storage_mut::<T>()
            .ok_or_else(|| Error::Unregistered(T::reflect().name()))?;
        storage.insert(entity, component)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        if !self.is_alive(entity) {
            return None;
        }
        self.registry.storage::<T>()?.get(entity)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn get_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        if !self.is_alive(entity) {
            return None;
        }
        self.registry.storage_mut::<T>()?.get_mut(entity)
    }

    /// Removes component of type `T` and detaches it from the entity.
    ///
    /// Returns component that was attached to the entity.
    ///
    pub fn remove<T>(&mut self, entity: Entity) -> Option<T>
    where
        T: Component,
    {
        if !self.is_alive(entity) {
            log::warn!("cannot remove component from dead entity {}", entity);
            return None;
        }
        self.registry.storage_mut::<T>()?.take(entity)
    }

    /// Creates new entity with copies of all components of the given one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeadEntity`] if the entity is not alive.
    /// If any component cannot be copied, the new entity is destroyed
    /// together with components already copied to it, and the error is returned.
    ///
    pub fn duplicate(&mut self, entity: Entity) -> Result<Entity> {
        self.check_alive(entity)?;
        let copy = self.entities.spawn();
        let copied = self
            .registry
            .stores_mut()
            .filter(|store| store.contains(entity))
            .try_for_each(|store| store.copy_component(entity, copy));
        if let Err(error) = copied {
            log::warn!("failed to duplicate entity {}: {}", entity, error);
            self.despawn(copy)?;
            return Err(error);
        }
        Ok(copy)
    }

    /// Deep copy of the world for readers which run alongside the writer.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    fn check_alive(&self, entity: Entity) -> Result<()> {
        if !self.is_alive(entity) {
            return Err(Error::DeadEntity(entity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use semver::Version;

    use super::*;
    use crate::{IdGenerator, Reflect};

    #[derive(Debug, Copy, Clone, PartialEq)]
    struct Position {
        x: f64,
        y: f64,
    }

    #[derive(Debug, Copy, Clone, PartialEq)]
    struct Velocity(f64, f64);

    fn world() -> World {
        let config = Config::new("test".to_string(), Version::new(0, 1, 0), 16);
        let registry = Registry::with_generator(Arc::new(IdGenerator::new()));
        World::with_registry(config, registry)
    }

    #[test]
    fn test_insertion() {
        let mut world = world();
        world.register::<Position>();
        let entity = world.spawn();

        world.insert(entity, Position { x: 1.0, y: 2.0 }).unwrap();
        world.get_mut::<Position>(entity).unwrap().y = 3.0;
        assert_eq!(
            world.get::<Position>(entity),
            Some(&Position { x: 1.0, y: 3.0 }),
        );
        assert_eq!(
            world.remove::<Position>(entity),
            Some(Position { x: 1.0, y: 3.0 }),
        );
        assert_eq!(world.get::<Position>(entity), None);
        assert_eq!(world.remove::<Position>(entity), None);
    }

    #[test]
    fn test_unregistered() {
        let mut world = world();
        let entity = world.spawn();

        assert_eq!(
            world.insert(entity, Velocity(0.0, 0.0)).err(),
            Some(Error::Unregistered(Velocity::reflect().name())),
        );
        assert_eq!(world.get::<Velocity>(entity), None);
    }

    #[test]
    fn test_despawn() {
        let mut world = world();
        world.register::<Position>();
        world.register::<Velocity>();
        let entity = world.spawn();
        world.insert(entity, Position { x: 0.0, y: 0.0 }).unwrap();
        world.insert(entity, Velocity(1.0, 1.0)).unwrap();

        world.despawn(entity).unwrap();
        assert!(!world.is_alive(entity));
        assert_eq!(world.despawn(entity), Err(Error::DeadEntity(entity)));
        assert_eq!(
            world.insert(entity, Velocity(1.0, 1.0)).err(),
            Some(Error::DeadEntity(entity)),
        );

        let reused = world.spawn();
        assert_eq!(reused.index(), entity.index());
        assert_eq!(world.get::<Position>(reused), None);
        assert_eq!(world.get::<Velocity>(entity), None);
    }

    #[test]
    fn test_duplicate() {
        let mut world = world();
        world.register::<Position>();
        world.register::<Velocity>();
        let entity = world.spawn();
        world.insert(entity, Position { x: 4.0, y: 2.0 }).unwrap();

        let copy = world.duplicate(entity).unwrap();
        assert_ne!(copy, entity);
        assert_eq!(
            world.get::<Position>(copy),
            Some(&Position { x: 4.0, y: 2.0 }),
        );
        assert_eq!(world.get::<Velocity>(copy), None);
    }

    #[test]
    fn test_duplicate_rollback() {
        let mut world = world();
        world.register::<Position>();
        world.register::<Velocity>();
        let entity = world.spawn();
        world.insert(entity, Position { x: 4.0, y: 2.0 }).unwrap();
        world.insert(entity, Velocity(1.0, 0.0)).unwrap();

        // stale component sits where the copy is going to be spawned
        let next = Entity::new(1, 0);
        world
            .registry_mut()
            .storage_mut::<Velocity>()
            .unwrap()
            .insert(next, Velocity(0.0, 0.0))
            .unwrap();

        assert_eq!(
            world.duplicate(entity),
            Err(Error::AlreadyAttached {
                entity: next,
                component: Velocity::reflect().name(),
            }),
        );
        assert!(!world.is_alive(next));
        assert_eq!(world.entities().len(), 1);
        assert_eq!(world.registry().storage::<Position>().unwrap().len(), 1);
        assert!(!world.registry().storage::<Velocity>().unwrap().contains(next));
        assert_eq!(
            world.get::<Position>(entity),
            Some(&Position { x: 4.0, y: 2.0 }),
        );
    }

    #[test]
    fn test_snapshot() {
        let mut world = world();
        world.register::<Position>();
        let entity = world.spawn();
        world.insert(entity, Position { x: 1.0, y: 1.0 }).unwrap();

        let snapshot = world.snapshot();
        world.get_mut::<Position>(entity).unwrap().x = 5.0;

        assert_eq!(snapshot.get::<Position>(entity).unwrap().x, 1.0);
        assert_eq!(world.get::<Position>(entity).unwrap().x, 5.0);
        assert_eq!(snapshot.config().name(), "test");
    }
}
