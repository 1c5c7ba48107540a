//! The entity record (§3, non-celestial movable objects).

use mesh_fixed::{Fp, Vec2Fp};
use serde::{Deserialize, Serialize};

use crate::ids::{CelestialId, EntityId, PlayerId};

/// Discriminates the kind of entity. The catalogue is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// A generic ship or object with no special role.
    Generic,
    /// A player- or faction-owned corporate asset.
    Corporate,
    /// A fixed or semi-fixed platform.
    Platform,
    /// A resource-bearing well that EXTRACT targets.
    ResourceWell,
    /// A store of refined minerals, typically spawned by EXTRACT.
    MineralStore,
}

/// Environmental zoom state, reclassified once per tick by a small
/// state machine keyed on distance to celestials (§4.4 step 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomState {
    /// Free space, far from any celestial's capture radius.
    Space,
    /// Within a celestial's orbit capture radius.
    Orbit,
    /// Landed on a celestial's surface.
    Surface,
}

/// A non-celestial movable object.
///
/// See §3 for the full invariant list (I1-I8); `mesh_model::invariants`
/// checks all of them against a [`crate::world::WorldState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Stable unique identifier.
    pub id: EntityId,
    /// Discriminator.
    pub kind: EntityKind,
    /// Owning player, if any.
    pub player_id: Option<PlayerId>,
    /// World-space position.
    pub position: Vec2Fp,
    /// World-space velocity.
    pub velocity: Vec2Fp,
    /// Facing angle, FP-degrees on `[0, 360_000)`.
    pub heading: Fp,
    /// Last-tick thrust magnitude.
    pub thrust: Fp,
    /// Dry mass plus contained/welded mass -- see I7.
    pub mass: Fp,
    /// Volume, non-negative.
    pub volume: Fp,
    /// Fuel reserve, non-negative.
    pub fuel_mass: Fp,
    /// Unrefined volatiles reserve, non-negative.
    pub volatiles_mass: Fp,
    /// Maximum interaction distance, non-negative.
    pub reach: Fp,
    /// Pre-requisite for structural ops (WELD, UNWELD).
    pub airlock_sealed: bool,
    /// Sensor visibility level, `0..=3`. Carried for completeness; not
    /// consulted by the deterministic resolver.
    pub optic_level: u8,
    /// Containment: this entity is inside that one.
    pub parent_id: Option<EntityId>,
    /// Whether this entity can contain others.
    pub is_container: bool,
    /// Container capacity, consulted by LOAD's Triad check (I6).
    pub container_volume: Fp,
    /// Interior opacity, carried for completeness (sensor visibility).
    pub in_opacity: Fp,
    /// Welding: this entity is rigidly offset from that one.
    pub weld_parent_id: Option<EntityId>,
    /// Offset from the weld parent's position, held exact (I4).
    pub relative_offset: Option<Vec2Fp>,
    /// Celestial this entity currently orbits, if any.
    pub orbit_target_id: Option<CelestialId>,
    /// Environmental zoom state.
    pub zoom_state: ZoomState,
}

impl Entity {
    /// Whether this entity is contained within another (`parent_id` set).
    pub fn is_contained(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Whether this entity is welded to another (`weld_parent_id` set).
    pub fn is_welded(&self) -> bool {
        self.weld_parent_id.is_some()
    }

    /// A root entity has neither a container parent nor a weld parent --
    /// translation (§4.2) only ever applies to roots.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none() && self.weld_parent_id.is_none()
    }
}
