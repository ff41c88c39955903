//! Entity Component System (ECS) storage for the Iodine runtime.
//!
//! Components of arbitrary types are attached to lightweight [`Entity`] handles
//! and kept in per-type [`Storage`]s, which are owned by a [`Registry`]
//! behind the type-erased [`Dashboard`] interface.

pub use component::{
    Component, ComponentId, Dashboard, IdGenerator, Registry, SparseSet, Storage,
};
pub use config::Config;
pub use entity::{Entities, Entity};
pub use error::{Error, Result};
pub use reflect::{Reflect, Type};
pub use world::World;

pub mod config;

mod component;
mod entity;
mod error;
mod reflect;
mod world;

#[cfg(test)]
mod capture;
