//! LOAD (§4.1.2, containment).

use mesh_fixed::within_reach;
use mesh_model::action::ActionPayload;
use mesh_model::entity::Entity;

use crate::context::TickContext;
use crate::update::{EntityChange, EntityChanges};

/// The Triad: reach, container capability, and remaining capacity.
pub fn validate(actor: &Entity, _targets: &[&Entity], payload: &ActionPayload, ctx: &TickContext) -> bool {
    let ActionPayload::Load { content_ids, container_id } = payload else {
        return false;
    };
    if content_ids.is_empty() {
        return false;
    }
    let Some(container) = ctx.world.entity(container_id) else {
        return false;
    };
    if !container.is_container {
        return false;
    }

    let mut contents = Vec::with_capacity(content_ids.len());
    for id in content_ids {
        if id == container_id {
            return false; // content cannot be the container itself
        }
        let Some(content) = ctx.world.entity(id) else {
            return false;
        };
        if content.is_contained() {
            return false; // already contained
        }
        contents.push(content);
    }

    // Reach: actor must be within reach of each content and of the
    // container, or actor is the container itself.
    let actor_is_container = actor.id == *container_id;
    if !actor_is_container && !within_reach(actor.position, container.position, actor.reach) {
        return false;
    }
    for content in &contents {
        if actor.id != content.id && !within_reach(actor.position, content.position, actor.reach) {
            return false;
        }
    }

    // Remaining capacity, accounting for children already contained.
    let already_occupied: i64 = ctx
        .world
        .iter_entities()
        .filter(|e| e.parent_id.as_ref() == Some(container_id))
        .map(|e| e.volume.raw())
        .sum();
    let requested: i64 = contents.iter().map(|c| c.volume.raw()).sum();
    already_occupied + requested <= container.container_volume.raw()
}

/// Bind each content to the container's position and grow the container's
/// mass by the sum of content masses.
pub fn handle(
    actor: &Entity,
    targets: &[&Entity],
    payload: &ActionPayload,
    ctx: &TickContext,
) -> Vec<EntityChange> {
    if !validate(actor, targets, payload, ctx) {
        return Vec::new();
    }
    let ActionPayload::Load { content_ids, container_id } = payload else {
        return Vec::new();
    };
    let Some(container) = ctx.world.entity(container_id) else {
        return Vec::new();
    };

    let mut changes = Vec::with_capacity(content_ids.len() + 1);
    let mut total_content_mass = mesh_fixed::Fp::ZERO;
    for id in content_ids {
        let Some(content) = ctx.world.entity(id) else {
            continue;
        };
        total_content_mass = mesh_fixed::Fp::add(total_content_mass, content.mass);
        changes.push(EntityChange::update(
            id.clone(),
            EntityChanges {
                parent_id: Some(Some(container_id.clone())),
                position: Some(container.position),
                ..Default::default()
            },
        ));
    }
    changes.push(EntityChange::update(
        container_id.clone(),
        EntityChanges {
            mass: Some(mesh_fixed::Fp::add(container.mass, total_content_mass)),
            ..Default::default()
        },
    ));
    changes
}
