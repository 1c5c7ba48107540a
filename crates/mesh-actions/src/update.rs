//! `EntityUpdate`/`EntitySpawn` -- the only way a handler may describe a
//! state change (§4.1, §9 Open Question: spawn semantics).
//!
//! Handlers never mutate their inputs; they return a list of
//! [`EntityChange`]s which the pipeline (`mesh-resolver`) applies to a copy
//! of the world by field-merge. Spawns are a distinct variant rather than
//! an update whose id doesn't yet exist, per the Open Question decision
//! recorded in `DESIGN.md`.

use mesh_fixed::{Fp, Vec2Fp};
use mesh_model::celestial::CelestialId;
use mesh_model::entity::{Entity, ZoomState};
use mesh_model::ids::EntityId;
use mesh_model::world::WorldState;

/// A partial update to an entity's fields. Every field is `Option`-wrapped
/// so "not touched" is distinguishable from "set to a new value"; fields
/// that are themselves optional on `Entity` use a nested `Option<Option<T>>`
/// so a handler can explicitly clear them (e.g. UNLOAD clearing `parent_id`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityChanges {
    pub position: Option<Vec2Fp>,
    pub velocity: Option<Vec2Fp>,
    pub heading: Option<Fp>,
    pub thrust: Option<Fp>,
    pub mass: Option<Fp>,
    pub fuel_mass: Option<Fp>,
    pub volatiles_mass: Option<Fp>,
    pub airlock_sealed: Option<bool>,
    pub parent_id: Option<Option<EntityId>>,
    pub weld_parent_id: Option<Option<EntityId>>,
    pub relative_offset: Option<Option<Vec2Fp>>,
    pub orbit_target_id: Option<Option<CelestialId>>,
    pub zoom_state: Option<ZoomState>,
}

/// A single targeted update.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityUpdate {
    pub id: EntityId,
    pub changes: EntityChanges,
}

/// A newly spawned entity (§4.1.8, EXTRACT's MINERALS path).
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpawn {
    pub entity: Entity,
}

/// Everything a handler may emit.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityChange {
    Update(EntityUpdate),
    Spawn(EntitySpawn),
}

impl EntityChange {
    /// Construct an update change.
    pub fn update(id: EntityId, changes: EntityChanges) -> Self {
        EntityChange::Update(EntityUpdate { id, changes })
    }

    /// Construct a spawn change.
    pub fn spawn(entity: Entity) -> Self {
        EntityChange::Spawn(EntitySpawn { entity })
    }
}

/// Merge one update into `world`, field by field. Spawns insert the new
/// entity outright (it does not yet exist, so there is nothing to merge
/// against). Updates targeting an id not present in `world` are dropped --
/// that is stale-entity territory, not a handler bug.
pub fn apply_change(world: &mut WorldState, change: &EntityChange) {
    match change {
        EntityChange::Spawn(spawn) => {
            world.upsert_entity(spawn.entity.clone());
        }
        EntityChange::Update(update) => {
            let Some(entity) = world.entities.get_mut(&update.id) else {
                tracing::debug!(entity = %update.id, "dropping update for unknown entity");
                return;
            };
            let c = &update.changes;
            if let Some(v) = c.position {
                entity.position = v;
            }
            if let Some(v) = c.velocity {
                entity.velocity = v;
            }
            if let Some(v) = c.heading {
                entity.heading = v;
            }
            if let Some(v) = c.thrust {
                entity.thrust = v;
            }
            if let Some(v) = c.mass {
                entity.mass = v;
            }
            if let Some(v) = c.fuel_mass {
                entity.fuel_mass = v;
            }
            if let Some(v) = c.volatiles_mass {
                entity.volatiles_mass = v;
            }
            if let Some(v) = c.airlock_sealed {
                entity.airlock_sealed = v;
            }
            if let Some(v) = c.parent_id.clone() {
                entity.parent_id = v;
            }
            if let Some(v) = c.weld_parent_id.clone() {
                entity.weld_parent_id = v;
            }
            if let Some(v) = c.relative_offset {
                entity.relative_offset = v;
            }
            if let Some(v) = c.orbit_target_id.clone() {
                entity.orbit_target_id = v;
            }
            if let Some(v) = c.zoom_state {
                entity.zoom_state = v;
            }
        }
    }
}

/// Apply a whole batch of changes in order (later changes to the same
/// field win -- "last write wins", matching the teacher's command-buffer
/// conflict semantics).
pub fn apply_changes(world: &mut WorldState, changes: &[EntityChange]) {
    for change in changes {
        apply_change(world, change);
    }
}
