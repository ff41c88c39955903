//! Configuration utilities for component storage of your game.

use semver::Version;

/// This struct represents configuration of one simulation world.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    version: Version,
    capacity: usize,
}

pub const ENGINE_NAME: &str = env!("CARGO_CRATE_NAME", "library must be compiled by Cargo");

const ENGINE_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "library must be compiled by Cargo");
lazy_static::lazy_static! {
    pub static ref ENGINE_VERSION: Version = Version::parse(ENGINE_VERSION_STR)
        .unwrap_or_else(|_| Version::new(0, 0, 0));
}

impl Config {
    /// Creates new configuration with given name, version and initial capacity.
    pub const fn new(name: String, version: Version, capacity: usize) -> Self {
        Self {
            name,
            version,
            capacity,
        }
    }

    /// Name of the world, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of your game.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// How many entities storages should have space for up front.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("world".to_string(), Version::new(0, 0, 0), 0)
    }
}
