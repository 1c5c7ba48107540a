//! SEAL_AIRLOCK / UNSEAL_AIRLOCK (§4.1.6). Trivial toggles guarded by the
//! current state.

use mesh_model::action::ActionPayload;
use mesh_model::entity::Entity;

use crate::context::TickContext;
use crate::update::{EntityChange, EntityChanges};

pub fn validate_seal(actor: &Entity, _payload: &ActionPayload) -> bool {
    !actor.airlock_sealed
}

pub fn handle_seal(actor: &Entity, _targets: &[&Entity], payload: &ActionPayload, _ctx: &TickContext) -> Vec<EntityChange> {
    if !validate_seal(actor, payload) {
        return Vec::new();
    }
    vec![EntityChange::update(
        actor.id.clone(),
        EntityChanges { airlock_sealed: Some(true), ..Default::default() },
    )]
}

pub fn validate_unseal(actor: &Entity, _payload: &ActionPayload) -> bool {
    actor.airlock_sealed
}

pub fn handle_unseal(actor: &Entity, _targets: &[&Entity], payload: &ActionPayload, _ctx: &TickContext) -> Vec<EntityChange> {
    if !validate_unseal(actor, payload) {
        return Vec::new();
    }
    vec![EntityChange::update(
        actor.id.clone(),
        EntityChanges { airlock_sealed: Some(false), ..Default::default() },
    )]
}
