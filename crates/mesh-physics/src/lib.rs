//! Physics settlement (§4.2, C5): `applyBinding` and `applyTranslation`.
//!
//! Both are pure `WorldState -> WorldState` transformations -- no field
//! besides `position` (and, transitively, nothing else) is touched here.
//! Velocity integration happens once per tick in `applyTranslation`;
//! containment and welding only ever reposition, never reaccelerate.

use std::collections::{HashMap, VecDeque};

use mesh_model::ids::EntityId;
use mesh_model::world::WorldState;

/// Depth of each entity in its containment/weld chain, roots at depth 0.
/// An entity with a dangling or cyclic parent reference is treated as its
/// own root (depth 0) rather than panicking -- `mesh_model::invariants`
/// is where such a world gets flagged, not here.
fn chain_depths(world: &WorldState) -> HashMap<EntityId, u32> {
    let mut depth = HashMap::new();
    for entity in world.iter_entities() {
        if entity.is_root() {
            depth.insert(entity.id.clone(), 0);
        }
    }

    let mut pending: VecDeque<EntityId> = world
        .iter_entities()
        .filter(|e| !e.is_root())
        .map(|e| e.id.clone())
        .collect();

    // Relax repeatedly: an entity's depth is known once its parent's is.
    // Bounded by entity count so a cyclic or dangling reference (which
    // invariants.rs would flag separately) can't spin forever.
    let mut rounds = pending.len() + 1;
    while let Some(id) = pending.pop_front() {
        if rounds == 0 {
            depth.entry(id).or_insert(0);
            continue;
        }
        let Some(entity) = world.entity(&id) else {
            continue;
        };
        let parent_id = entity.parent_id.as_ref().or(entity.weld_parent_id.as_ref());
        match parent_id.and_then(|p| depth.get(p)) {
            Some(parent_depth) => {
                depth.insert(id, parent_depth + 1);
            }
            None => {
                pending.push_back(id);
                rounds -= 1;
            }
        }
    }
    depth
}

/// Entities in topological order (roots first) by chain depth, ties
/// broken by the canonical by-id order `iter_entities` already provides.
fn topological_order(world: &WorldState) -> Vec<EntityId> {
    let depth = chain_depths(world);
    let mut ids: Vec<EntityId> = world.iter_entities().map(|e| e.id.clone()).collect();
    ids.sort_by_key(|id| *depth.get(id).unwrap_or(&0));
    ids
}

/// For every entity with `parent_id`, overwrite `position` with the
/// parent's `position`. For every entity with `weld_parent_id`, overwrite
/// `position` with `parent.position + relative_offset`. Applied in
/// topological order so a multi-level chain settles in a single pass.
pub fn apply_binding(world: &mut WorldState) {
    for id in topological_order(world) {
        let Some(entity) = world.entity(&id) else { continue };
        if let Some(parent_id) = entity.parent_id.clone() {
            let Some(parent) = world.entity(&parent_id) else { continue };
            let new_position = parent.position;
            if let Some(entity) = world.entities.get_mut(&id) {
                entity.position = new_position;
            }
        } else if let Some(weld_parent_id) = entity.weld_parent_id.clone() {
            let Some(parent) = world.entity(&weld_parent_id) else { continue };
            let offset = entity.relative_offset.unwrap_or(mesh_fixed::Vec2Fp::ZERO);
            let new_position = parent.position.add(offset);
            if let Some(entity) = world.entities.get_mut(&id) {
                entity.position = new_position;
            }
        }
    }
}

/// For every root entity (no `parent_id`, no `weld_parent_id`), advance
/// `position` by `velocity`. Non-roots are untouched -- they receive their
/// position from the next `apply_binding` pass.
pub fn apply_translation(world: &mut WorldState) {
    let root_ids: Vec<EntityId> = world
        .iter_entities()
        .filter(|e| e.is_root())
        .map(|e| e.id.clone())
        .collect();
    for id in root_ids {
        if let Some(entity) = world.entities.get_mut(&id) {
            entity.position = entity.position.add(entity.velocity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_fixed::{fp, Vec2Fp};
    use mesh_model::entity::{Entity, EntityKind, ZoomState};

    fn base_entity(id: &str) -> Entity {
        Entity {
            id: EntityId::from(id),
            kind: EntityKind::Generic,
            player_id: None,
            position: Vec2Fp::ZERO,
            velocity: Vec2Fp::ZERO,
            heading: fp(0.0),
            thrust: fp(0.0),
            mass: fp(1000.0),
            volume: fp(10.0),
            fuel_mass: fp(200.0),
            volatiles_mass: fp(0.0),
            reach: fp(50.0),
            airlock_sealed: false,
            optic_level: 0,
            parent_id: None,
            is_container: false,
            container_volume: fp(0.0),
            in_opacity: fp(0.0),
            weld_parent_id: None,
            relative_offset: None,
            orbit_target_id: None,
            zoom_state: ZoomState::Space,
        }
    }

    #[test]
    fn translation_only_moves_roots() {
        let mut world = WorldState::new("seed");
        let mut root = base_entity("root");
        root.velocity = Vec2Fp::new(fp(1.0), fp(0.0));
        let mut child = base_entity("child");
        child.parent_id = Some(EntityId::from("root"));
        child.velocity = Vec2Fp::new(fp(99.0), fp(99.0));
        world.upsert_entity(root);
        world.upsert_entity(child);

        apply_translation(&mut world);

        assert_eq!(world.entity(&EntityId::from("root")).unwrap().position, Vec2Fp::new(fp(1.0), fp(0.0)));
        assert_eq!(world.entity(&EntityId::from("child")).unwrap().position, Vec2Fp::ZERO);
    }

    #[test]
    fn binding_settles_a_weld_chain_in_one_pass() {
        let mut world = WorldState::new("seed");
        let mut hub = base_entity("hub");
        hub.position = Vec2Fp::new(fp(10.0), fp(0.0));
        let mut arm = base_entity("arm");
        arm.weld_parent_id = Some(EntityId::from("hub"));
        arm.relative_offset = Some(Vec2Fp::new(fp(1.0), fp(0.0)));
        let mut tool = base_entity("tool");
        tool.weld_parent_id = Some(EntityId::from("arm"));
        tool.relative_offset = Some(Vec2Fp::new(fp(0.5), fp(0.0)));

        world.upsert_entity(hub);
        world.upsert_entity(arm);
        world.upsert_entity(tool);

        apply_binding(&mut world);

        assert_eq!(world.entity(&EntityId::from("arm")).unwrap().position, Vec2Fp::new(fp(11.0), fp(0.0)));
        assert_eq!(world.entity(&EntityId::from("tool")).unwrap().position, Vec2Fp::new(fp(11.5), fp(0.0)));
    }

    #[test]
    fn binding_binds_containment_to_exact_parent_position() {
        let mut world = WorldState::new("seed");
        let mut container = base_entity("container");
        container.position = Vec2Fp::new(fp(3.0), fp(4.0));
        let mut content = base_entity("content");
        content.parent_id = Some(EntityId::from("container"));
        world.upsert_entity(container);
        world.upsert_entity(content);

        apply_binding(&mut world);

        assert_eq!(world.entity(&EntityId::from("content")).unwrap().position, Vec2Fp::new(fp(3.0), fp(4.0)));
    }
}
