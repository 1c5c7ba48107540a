//! UNLOAD (§4.1.3, containment).

use std::collections::HashMap;

use mesh_fixed::within_reach;
use mesh_model::action::ActionPayload;
use mesh_model::entity::Entity;
use mesh_model::ids::EntityId;

use crate::context::TickContext;
use crate::update::{EntityChange, EntityChanges};

pub fn validate(actor: &Entity, _targets: &[&Entity], payload: &ActionPayload, ctx: &TickContext) -> bool {
    let ActionPayload::Unload { content_ids, new_positions } = payload else {
        return false;
    };
    if content_ids.is_empty() || content_ids.len() != new_positions.len() {
        return false;
    }
    for id in content_ids {
        let Some(content) = ctx.world.entity(id) else {
            return false;
        };
        let Some(container_id) = &content.parent_id else {
            return false; // not contained
        };
        let Some(container) = ctx.world.entity(container_id) else {
            return false;
        };
        if actor.id != container.id && !within_reach(actor.position, container.position, actor.reach) {
            return false;
        }
    }
    true
}

/// Release each content at its new position, inheriting the container's
/// velocity at the moment of separation, and shrink the container's mass.
pub fn handle(
    actor: &Entity,
    targets: &[&Entity],
    payload: &ActionPayload,
    ctx: &TickContext,
) -> Vec<EntityChange> {
    if !validate(actor, targets, payload, ctx) {
        return Vec::new();
    }
    let ActionPayload::Unload { content_ids, new_positions } = payload else {
        return Vec::new();
    };

    let mut mass_removed: HashMap<EntityId, mesh_fixed::Fp> = HashMap::new();
    let mut changes = Vec::with_capacity(content_ids.len());
    for (id, new_position) in content_ids.iter().zip(new_positions.iter()) {
        let Some(content) = ctx.world.entity(id) else {
            continue;
        };
        let Some(container_id) = content.parent_id.clone() else {
            continue;
        };
        let Some(container) = ctx.world.entity(&container_id) else {
            continue;
        };
        let entry = mass_removed.entry(container_id.clone()).or_insert(mesh_fixed::Fp::ZERO);
        *entry = mesh_fixed::Fp::add(*entry, content.mass);
        changes.push(EntityChange::update(
            id.clone(),
            EntityChanges {
                parent_id: Some(None),
                position: Some(*new_position),
                velocity: Some(container.velocity),
                ..Default::default()
            },
        ));
    }
    for (container_id, removed) in mass_removed {
        if let Some(container) = ctx.world.entity(&container_id) {
            changes.push(EntityChange::update(
                container_id,
                EntityChanges {
                    mass: Some(mesh_fixed::Fp::sub(container.mass, removed)),
                    ..Default::default()
                },
            ));
        }
    }
    changes
}
