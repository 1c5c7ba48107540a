//! Invariant checks (§3, I1-I8).
//!
//! `check_all` never panics; it collects every violation it finds rather
//! than failing fast, since a `Fatal` (§7) report should tell the operator
//! everything that is wrong with a tick, not just the first thing.

use std::collections::HashSet;

use crate::entity::Entity;
use crate::error::ModelError;
use crate::ids::EntityId;
use crate::world::WorldState;

/// Run every invariant check against `world` and return all violations
/// found. An empty vec means the world satisfies I1-I8.
pub fn check_all(world: &WorldState) -> Vec<ModelError> {
    let mut violations = Vec::new();
    violations.extend(check_containment_acyclic(world));
    violations.extend(check_weld_acyclic(world));
    violations.extend(check_position_binding(world));
    violations.extend(check_weld_offset(world));
    violations.extend(check_mutual_exclusion(world));
    violations.extend(check_containment_volume(world));
    violations.extend(check_mass_accounting(world));
    violations.extend(check_non_negative_resources(world));
    violations
}

/// Follow a parent-link chain starting at `start`, returning `true` if a
/// cycle is detected (visiting the same id twice, or exceeding the total
/// entity count of steps).
fn chain_has_cycle<'a>(
    world: &'a WorldState,
    start: &'a EntityId,
    next: impl Fn(&Entity) -> Option<&EntityId>,
) -> bool {
    let mut seen = HashSet::new();
    let mut current = start;
    loop {
        if !seen.insert(current.clone()) {
            return true;
        }
        let Some(entity) = world.entity(current) else {
            return false;
        };
        match next(entity) {
            Some(parent) => current = parent,
            None => return false,
        }
    }
}

/// I1: following `parent_id` from any entity terminates.
pub fn check_containment_acyclic(world: &WorldState) -> Vec<ModelError> {
    world
        .iter_entities()
        .filter(|e| e.parent_id.is_some())
        .filter(|e| chain_has_cycle(world, &e.id, |e| e.parent_id.as_ref()))
        .map(|e| ModelError::ContainmentCycle { entity: e.id.clone() })
        .collect()
}

/// I2: following `weld_parent_id` from any entity terminates.
pub fn check_weld_acyclic(world: &WorldState) -> Vec<ModelError> {
    world
        .iter_entities()
        .filter(|e| e.weld_parent_id.is_some())
        .filter(|e| chain_has_cycle(world, &e.id, |e| e.weld_parent_id.as_ref()))
        .map(|e| ModelError::WeldCycle { entity: e.id.clone() })
        .collect()
}

/// I3: if `parent_id` is set, `position == parent.position` exactly.
pub fn check_position_binding(world: &WorldState) -> Vec<ModelError> {
    let mut violations = Vec::new();
    for entity in world.iter_entities() {
        if let Some(parent_id) = &entity.parent_id {
            if let Some(parent) = world.entity(parent_id) {
                if entity.position != parent.position {
                    violations.push(ModelError::PositionBindingViolated {
                        entity: entity.id.clone(),
                    });
                }
            }
        }
    }
    violations
}

/// I4: if `weld_parent_id` is set, `position == weldParent.position + relativeOffset`.
pub fn check_weld_offset(world: &WorldState) -> Vec<ModelError> {
    let mut violations = Vec::new();
    for entity in world.iter_entities() {
        if let Some(weld_parent_id) = &entity.weld_parent_id {
            if let Some(parent) = world.entity(weld_parent_id) {
                let expected = entity
                    .relative_offset
                    .map(|offset| parent.position.add(offset));
                if Some(entity.position) != expected {
                    violations.push(ModelError::WeldOffsetViolated {
                        entity: entity.id.clone(),
                    });
                }
            }
        }
    }
    violations
}

/// I5: `parent_id` and `weld_parent_id` are not both set.
pub fn check_mutual_exclusion(world: &WorldState) -> Vec<ModelError> {
    world
        .iter_entities()
        .filter(|e| e.parent_id.is_some() && e.weld_parent_id.is_some())
        .map(|e| ModelError::MutualExclusionViolated { entity: e.id.clone() })
        .collect()
}

/// I6: sum of direct children's volume does not exceed `container_volume`.
pub fn check_containment_volume(world: &WorldState) -> Vec<ModelError> {
    let mut violations = Vec::new();
    for container in world.iter_entities().filter(|e| e.is_container) {
        let occupied: i64 = world
            .iter_entities()
            .filter(|child| child.parent_id.as_ref() == Some(&container.id))
            .map(|child| child.volume.raw())
            .sum();
        if occupied > container.container_volume.raw() {
            violations.push(ModelError::ContainmentVolumeExceeded {
                container: container.id.clone(),
                actual: occupied,
                capacity: container.container_volume.raw(),
            });
        }
    }
    violations
}

/// I7: a container's or weld root's mass must be at least the sum of its
/// direct children's mass (dry mass fills the non-negative remainder).
/// Summing system totals over roots only (P6) avoids double-counting
/// contained/welded children.
pub fn check_mass_accounting(world: &WorldState) -> Vec<ModelError> {
    let mut violations = Vec::new();
    for parent in world.iter_entities() {
        let contained_children: i64 = world
            .iter_entities()
            .filter(|child| child.parent_id.as_ref() == Some(&parent.id))
            .map(|child| child.mass.raw())
            .sum();
        let welded_children: i64 = world
            .iter_entities()
            .filter(|child| child.weld_parent_id.as_ref() == Some(&parent.id))
            .map(|child| child.mass.raw())
            .sum();
        let required = contained_children + welded_children;
        if parent.mass.raw() < required {
            violations.push(ModelError::MassAccountingViolated {
                entity: parent.id.clone(),
                expected: required,
                actual: parent.mass.raw(),
            });
        }
    }
    violations
}

/// I8: `fuel_mass`, `volatiles_mass`, `mass` are all non-negative.
pub fn check_non_negative_resources(world: &WorldState) -> Vec<ModelError> {
    let mut violations = Vec::new();
    for entity in world.iter_entities() {
        if entity.fuel_mass.raw() < 0 {
            violations.push(ModelError::NegativeResource {
                entity: entity.id.clone(),
                field: "fuel_mass",
                value: entity.fuel_mass.raw(),
            });
        }
        if entity.volatiles_mass.raw() < 0 {
            violations.push(ModelError::NegativeResource {
                entity: entity.id.clone(),
                field: "volatiles_mass",
                value: entity.volatiles_mass.raw(),
            });
        }
        if entity.mass.raw() < 0 {
            violations.push(ModelError::NegativeResource {
                entity: entity.id.clone(),
                field: "mass",
                value: entity.mass.raw(),
            });
        }
    }
    violations
}
