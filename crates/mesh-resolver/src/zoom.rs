//! Environmental zoom-state transitions (§4.4 step 4).
//!
//! Outside the hot resolution contract, but still run once per tick: each
//! entity is reclassified by its distance to the nearest positioned
//! celestial.

use mesh_fixed::distance_squared;
use mesh_model::entity::ZoomState;
use mesh_model::world::WorldState;

/// Reclassify every entity's `zoom_state` by distance to celestials.
/// Within a celestial's `radius`: `Surface`. Within its `capture_radius`:
/// `Orbit`. Otherwise: `Space`. Wormholes have no position and are never
/// consulted here.
pub fn apply_zoom_transitions(world: &mut WorldState) {
    let celestial_positions: Vec<(mesh_fixed::Fp, mesh_fixed::Fp, mesh_fixed::Vec2Fp)> = world
        .celestials
        .values()
        .filter_map(|c| c.position().map(|p| (c.radius, c.capture_radius, p)))
        .collect();

    let entity_ids: Vec<_> = world.iter_entities().map(|e| e.id.clone()).collect();
    for id in entity_ids {
        let Some(entity) = world.entity(&id) else { continue };
        let position = entity.position;

        let mut new_state = ZoomState::Space;
        for &(radius, capture_radius, celestial_position) in &celestial_positions {
            let d2 = distance_squared(position, celestial_position);
            if d2.raw() <= mesh_fixed::Fp::mul(radius, radius).raw() {
                new_state = ZoomState::Surface;
                break;
            }
            if d2.raw() <= mesh_fixed::Fp::mul(capture_radius, capture_radius).raw() {
                new_state = ZoomState::Orbit;
            }
        }

        if let Some(entity) = world.entities.get_mut(&id) {
            entity.zoom_state = new_state;
        }
    }
}
