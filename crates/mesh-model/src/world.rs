//! World state (§3).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::celestial::{Celestial, StarSystem};
use crate::entity::Entity;
use crate::ids::{CelestialId, EntityId, SystemId};

/// The complete, serializable world state for one tick.
///
/// Entities and celestials are stored in `BTreeMap`s keyed by id so that
/// canonical (by-id lexicographic ascending) iteration is the only
/// iteration order available -- insertion order is never observable (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// The current tick number.
    pub tick: u64,
    /// The world's genesis seed. Carried for completeness; procedural
    /// generation itself is out of scope.
    pub seed: String,
    /// Star systems, keyed by id.
    pub systems: BTreeMap<SystemId, StarSystem>,
    /// Celestials, keyed by id.
    pub celestials: BTreeMap<CelestialId, Celestial>,
    /// Entities, keyed by id.
    pub entities: BTreeMap<EntityId, Entity>,
}

impl WorldState {
    /// An empty world at tick 0.
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            tick: 0,
            seed: seed.into(),
            systems: BTreeMap::new(),
            celestials: BTreeMap::new(),
            entities: BTreeMap::new(),
        }
    }

    /// Look up an entity by id.
    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Look up a celestial by id.
    pub fn celestial(&self, id: &CelestialId) -> Option<&Celestial> {
        self.celestials.get(id)
    }

    /// Insert or overwrite an entity.
    pub fn upsert_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.id.clone(), entity);
    }

    /// Remove an entity, returning it if it existed.
    pub fn remove_entity(&mut self, id: &EntityId) -> Option<Entity> {
        self.entities.remove(id)
    }

    /// Iterate entities in canonical (by-id ascending) order.
    pub fn iter_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }
}
