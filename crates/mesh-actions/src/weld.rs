//! WELD (§4.1.4).

use mesh_fixed::{within_reach, Fp, Vec2Fp};
use mesh_model::action::ActionPayload;
use mesh_model::entity::Entity;

use crate::context::TickContext;
use crate::update::{EntityChange, EntityChanges};

pub fn validate(actor: &Entity, _targets: &[&Entity], payload: &ActionPayload, ctx: &TickContext) -> bool {
    let ActionPayload::Weld { target_ids } = payload else {
        return false;
    };
    if target_ids.is_empty() || !actor.airlock_sealed || actor.is_welded() {
        return false;
    }
    for id in target_ids {
        if *id == actor.id {
            return false;
        }
        let Some(target) = ctx.world.entity(id) else {
            return false;
        };
        if target.is_welded() {
            return false;
        }
        if !within_reach(actor.position, target.position, actor.reach) {
            return false;
        }
    }
    true
}

/// Momentum-conserving combined velocity across `actor` and every target.
fn combined_velocity(actor: &Entity, targets: &[&Entity]) -> Vec2Fp {
    let mut momentum = actor.velocity.scale(actor.mass);
    let mut total_mass = actor.mass;
    for target in targets {
        momentum = momentum.add(target.velocity.scale(target.mass));
        total_mass = Fp::add(total_mass, target.mass);
    }
    if total_mass.raw() == 0 {
        return Vec2Fp::ZERO;
    }
    Vec2Fp::new(Fp::div(momentum.x, total_mass), Fp::div(momentum.y, total_mass))
}

/// Weld every target to `actor` at its current relative offset, conserving
/// momentum across the assembly.
pub fn handle(
    actor: &Entity,
    targets: &[&Entity],
    payload: &ActionPayload,
    ctx: &TickContext,
) -> Vec<EntityChange> {
    if !validate(actor, targets, payload, ctx) {
        return Vec::new();
    }
    let ActionPayload::Weld { target_ids } = payload else {
        return Vec::new();
    };

    let resolved: Vec<&Entity> = target_ids.iter().filter_map(|id| ctx.world.entity(id)).collect();
    let combined_v = combined_velocity(actor, &resolved);
    let total_target_mass = resolved.iter().fold(Fp::ZERO, |acc, t| Fp::add(acc, t.mass));

    let mut changes: Vec<EntityChange> = resolved
        .iter()
        .map(|target| {
            EntityChange::update(
                target.id.clone(),
                EntityChanges {
                    weld_parent_id: Some(Some(actor.id.clone())),
                    relative_offset: Some(Some(target.position.sub(actor.position))),
                    velocity: Some(combined_v),
                    ..Default::default()
                },
            )
        })
        .collect();

    changes.push(EntityChange::update(
        actor.id.clone(),
        EntityChanges {
            mass: Some(Fp::add(actor.mass, total_target_mass)),
            velocity: Some(combined_v),
            ..Default::default()
        },
    ));
    changes
}
