//! REFINE (§4.1.7).

use mesh_fixed::Fp;
use mesh_model::action::ActionPayload;
use mesh_model::entity::Entity;

use crate::constants;
use crate::context::TickContext;
use crate::update::{EntityChange, EntityChanges};

pub fn validate(actor: &Entity, _targets: &[&Entity], payload: &ActionPayload) -> bool {
    let ActionPayload::Refine { volatiles_amount } = payload else {
        return false;
    };
    actor.volatiles_mass.is_positive() && volatiles_amount.is_positive()
}

/// Convert a batch of volatiles into fuel at `REFINE_EFFICIENCY`, the
/// remainder lost as waste mass.
pub fn handle(
    actor: &Entity,
    targets: &[&Entity],
    payload: &ActionPayload,
    _ctx: &TickContext,
) -> Vec<EntityChange> {
    if !validate(actor, targets, payload) {
        return Vec::new();
    }
    let ActionPayload::Refine { volatiles_amount } = payload else {
        return Vec::new();
    };

    let effective = Fp::min(Fp::min(*volatiles_amount, constants::refine_max_batch()), actor.volatiles_mass);
    let fuel = Fp::mul(effective, constants::refine_efficiency());
    let waste = Fp::sub(effective, fuel);

    vec![EntityChange::update(
        actor.id.clone(),
        EntityChanges {
            volatiles_mass: Some(Fp::sub(actor.volatiles_mass, effective)),
            fuel_mass: Some(Fp::add(actor.fuel_mass, fuel)),
            mass: Some(Fp::sub(actor.mass, waste)),
            ..Default::default()
        },
    )]
}
