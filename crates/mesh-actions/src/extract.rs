//! EXTRACT (§4.1.8).
//!
//! VOLATILES pulls unrefined volatiles from each in-reach origin into the
//! actor. MINERALS shrinks an origin's mass and spawns a new `MineralStore`
//! entity -- the only handler that emits [`EntityChange::Spawn`] (§9 Open
//! Question: spawn semantics).

use mesh_fixed::{within_reach, Fp, Vec2Fp};
use mesh_model::action::{ActionPayload, ExtractPath};
use mesh_model::entity::{Entity, EntityKind, ZoomState};
use mesh_model::ids::EntityId;

use crate::context::TickContext;
use crate::update::{EntityChange, EntityChanges};

pub fn validate(actor: &Entity, targets: &[&Entity], payload: &ActionPayload) -> bool {
    let ActionPayload::Extract { path } = payload else {
        return false;
    };
    if targets.is_empty() {
        return false;
    }
    for origin in targets {
        if !within_reach(actor.position, origin.position, actor.reach) {
            return false;
        }
        match path {
            ExtractPath::Volatiles { rate } => {
                if !rate.is_positive() || !origin.volatiles_mass.is_positive() {
                    return false;
                }
            }
            ExtractPath::Minerals { amount, .. } => {
                if !amount.is_positive() || origin.mass.raw() < amount.raw() {
                    return false;
                }
            }
        }
    }
    true
}

pub fn handle(
    actor: &Entity,
    targets: &[&Entity],
    payload: &ActionPayload,
    ctx: &TickContext,
) -> Vec<EntityChange> {
    if !validate(actor, targets, payload) {
        return Vec::new();
    }
    let ActionPayload::Extract { path } = payload else {
        return Vec::new();
    };

    match path {
        ExtractPath::Volatiles { rate } => {
            let mut changes = Vec::with_capacity(targets.len() + 1);
            let mut total_drawn = Fp::ZERO;
            for origin in targets {
                let drawn = Fp::min(*rate, origin.volatiles_mass);
                total_drawn = Fp::add(total_drawn, drawn);
                changes.push(EntityChange::update(
                    origin.id.clone(),
                    EntityChanges {
                        volatiles_mass: Some(Fp::sub(origin.volatiles_mass, drawn)),
                        ..Default::default()
                    },
                ));
            }
            changes.push(EntityChange::update(
                actor.id.clone(),
                EntityChanges {
                    volatiles_mass: Some(Fp::add(actor.volatiles_mass, total_drawn)),
                    ..Default::default()
                },
            ));
            changes
        }
        ExtractPath::Minerals { amount, mineral_target_position } => {
            let mut changes = Vec::with_capacity(targets.len() * 2);
            for (i, origin) in targets.iter().enumerate() {
                changes.push(EntityChange::update(
                    origin.id.clone(),
                    EntityChanges {
                        mass: Some(Fp::sub(origin.mass, *amount)),
                        ..Default::default()
                    },
                ));
                changes.push(EntityChange::spawn(spawn_mineral_store(
                    ctx.tick,
                    i,
                    *amount,
                    *mineral_target_position,
                )));
            }
            changes
        }
    }
}

fn spawn_mineral_store(tick: u64, index: usize, amount: Fp, position: Vec2Fp) -> Entity {
    Entity {
        id: EntityId::from(format!("mineral-store-{tick}-{index}")),
        kind: EntityKind::MineralStore,
        player_id: None,
        position,
        velocity: Vec2Fp::ZERO,
        heading: Fp::ZERO,
        thrust: Fp::ZERO,
        mass: amount,
        volume: amount,
        fuel_mass: Fp::ZERO,
        volatiles_mass: Fp::ZERO,
        reach: Fp::ZERO,
        airlock_sealed: false,
        optic_level: 0,
        parent_id: None,
        is_container: false,
        container_volume: Fp::ZERO,
        in_opacity: Fp::ZERO,
        weld_parent_id: None,
        relative_offset: None,
        orbit_target_id: None,
        zoom_state: ZoomState::Space,
    }
}
