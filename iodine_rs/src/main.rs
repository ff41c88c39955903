//! Demo of component storage of `iodine` runtime

use std::error::Error;

use iodine_ecs::config::{ENGINE_NAME, ENGINE_VERSION};
use iodine_ecs::{Config, World};
use log::LevelFilter;

mod logger;

const APP_NAME: &str = env!("CARGO_CRATE_NAME", "binary must be compiled by Cargo");
const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "binary must be compiled by Cargo");

#[derive(Debug, Copy, Clone, PartialEq)]
struct Position {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Label(String);

fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let _handle = logger::init(APP_NAME, "logs", LevelFilter::Debug)?;
    log::info!("{} {} logger initialized successfully", ENGINE_NAME, *ENGINE_VERSION);

    let version: semver::Version = APP_VERSION_STR.parse()?;
    let config = Config::new(APP_NAME.to_string(), version, 64);
    let mut world = World::with_config(config);

    let position = world.register::<Position>();
    let label = world.register::<Label>();
    log::info!("registered components: position {}, label {}", position, label);

    let entities: Vec<_> = (0..4).map(|_| world.spawn()).collect();
    let entity = entities[3];

    world.insert(entity, Position { x: 1.0, y: 2.0 })?;
    world.insert(entity, Label("player".to_string()))?;
    log::info!("{} has {:?}", entity, world.get::<Position>(entity));

    if let Err(error) = world.insert(entity, Position { x: 9.0, y: 9.0 }) {
        log::info!("second insert rejected: {}", error);
    }
    log::info!("{} still has {:?}", entity, world.get::<Position>(entity));

    let copy = world.duplicate(entity)?;
    log::info!("{} copied to {} with {:?}", entity, copy, world.get::<Label>(copy));

    let store = world
        .registry_mut()
        .lookup_mut(position)
        .ok_or("position store is missing")?;
    store.remove(entity);
    log::info!(
        "{} has {:?} after removal",
        entity,
        store.get::<Position>(entity),
    );
    let len = store.len();
    store.remove(entity);
    log::info!("store of `{}` holds {} components", store.component_type(), len);

    world.despawn(copy)?;
    log::info!("{} entities left alive", world.entities().len());
    Ok(())
}
