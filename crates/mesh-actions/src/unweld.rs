//! UNWELD (§4.1.5).
//!
//! Only the direct weld edge between a target and its parent is cut.
//! Anything welded to the target itself keeps its own `weldParentId`
//! pointing at the target, so detaching one sub-assembly from the main
//! structure leaves that sub-assembly intact (S5).

use std::collections::HashMap;

use mesh_fixed::{within_reach, Fp};
use mesh_model::action::ActionPayload;
use mesh_model::entity::Entity;
use mesh_model::ids::EntityId;

use crate::context::TickContext;
use crate::update::{EntityChange, EntityChanges};

pub fn validate(actor: &Entity, _targets: &[&Entity], payload: &ActionPayload, ctx: &TickContext) -> bool {
    let ActionPayload::Unweld { target_ids } = payload else {
        return false;
    };
    if target_ids.is_empty() {
        return false;
    }
    for id in target_ids {
        let Some(target) = ctx.world.entity(id) else {
            return false;
        };
        let Some(parent_id) = &target.weld_parent_id else {
            return false;
        };
        let Some(parent) = ctx.world.entity(parent_id) else {
            return false;
        };
        if actor.id != parent.id && !within_reach(actor.position, target.position, actor.reach) {
            return false;
        }
    }
    true
}

/// Cut each target free of its weld parent, leaving any sub-assembly
/// welded to the target untouched.
pub fn handle(
    actor: &Entity,
    targets: &[&Entity],
    payload: &ActionPayload,
    ctx: &TickContext,
) -> Vec<EntityChange> {
    if !validate(actor, targets, payload, ctx) {
        return Vec::new();
    }
    let ActionPayload::Unweld { target_ids } = payload else {
        return Vec::new();
    };

    let mut mass_removed: HashMap<EntityId, Fp> = HashMap::new();
    let mut changes = Vec::with_capacity(target_ids.len());
    for id in target_ids {
        let Some(target) = ctx.world.entity(id) else {
            continue;
        };
        let Some(parent_id) = target.weld_parent_id.clone() else {
            continue;
        };
        let Some(parent) = ctx.world.entity(&parent_id) else {
            continue;
        };

        let entry = mass_removed.entry(parent_id).or_insert(Fp::ZERO);
        *entry = Fp::add(*entry, target.mass);

        changes.push(EntityChange::update(
            id.clone(),
            EntityChanges {
                weld_parent_id: Some(None),
                relative_offset: Some(None),
                velocity: Some(parent.velocity),
                ..Default::default()
            },
        ));
    }
    for (parent_id, removed) in mass_removed {
        if let Some(parent) = ctx.world.entity(&parent_id) {
            changes.push(EntityChange::update(
                parent_id,
                EntityChanges {
                    mass: Some(Fp::sub(parent.mass, removed)),
                    ..Default::default()
                },
            ));
        }
    }
    changes
}
