//! Utilities for *entities* in ECS.

use std::fmt;

use crate::{Error, Result};

/// Unique identifier of the *entity* of ECS.
///
/// Only the index is used to address components; the generation
/// detects handles that outlived the entity they were created for.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    /// Creates a handle from raw parts.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Dense index of the entity, used as the key of component storages.
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot this handle was created for.
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}#{}", self.index, self.generation)
    }
}

/// Storage for all entities of ECS.
///
/// Freed indices are reused with an incremented generation,
/// so stale handles are never mistaken for live ones.
///
#[derive(Debug, Clone, Default)]
pub struct Entities {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
    len: usize,
}

impl Entities {
    /// Creates an empty entity storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty entity storage with space for `capacity` entities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::with_capacity(capacity),
            alive: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates new entity, reusing a freed index if there is one.
    pub fn spawn(&mut self) -> Entity {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = index as usize;
            self.alive[slot] = true;
            return Entity::new(index, self.generations[slot]);
        }
        let index = self.generations.len() as u32;
        self.generations.push(0);
        self.alive.push(true);
        Entity::new(index, 0)
    }

    /// Destroys the entity and frees its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeadEntity`] if the handle is stale or was never spawned.
    ///
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        if !self.is_alive(entity) {
            return Err(Error::DeadEntity(entity));
        }
        let slot = entity.index();
        self.alive[slot] = false;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.push(entity.index);
        self.len -= 1;
        Ok(())
    }

    /// Returns `true` if the entity was spawned and not yet despawned.
    pub fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.index();
        self.alive.get(slot).copied().unwrap_or(false)
            && self.generations[slot] == entity.generation
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns iterator over all live entities.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.generations
            .iter()
            .zip(&self.alive)
            .enumerate()
            .filter(|(_, (_, alive))| **alive)
            .map(|(index, (generation, _))| Entity::new(index as u32, *generation))
    }
}
