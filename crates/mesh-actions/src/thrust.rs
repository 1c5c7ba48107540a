//! THRUST (§4.1.1).
//!
//! Open Question (direction normalization, recorded in `DESIGN.md`): a
//! provided `direction` vector already carries its own scale -- `(1000, 0)`
//! means "one unit along +X" -- and is multiplied by `magnitude` as-is, with
//! no re-normalization to a unit vector.

use mesh_fixed::{trig, Fp};
use mesh_model::action::ActionPayload;
use mesh_model::entity::Entity;

use crate::constants;
use crate::context::TickContext;
use crate::update::{EntityChange, EntityChanges};

/// `fuelMass > MINIMUM_FUEL_THRESHOLD AND magnitude > 0`.
pub fn validate(actor: &Entity, _targets: &[&Entity], payload: &ActionPayload) -> bool {
    let ActionPayload::Thrust { magnitude, .. } = payload else {
        return false;
    };
    actor.fuel_mass > constants::minimum_fuel_threshold() && magnitude.is_positive()
}

/// Clamp, fuel-starve, convert to a delta-v, and apply it (§4.1.1 steps 1-4).
pub fn handle(
    actor: &Entity,
    targets: &[&Entity],
    payload: &ActionPayload,
    _ctx: &TickContext,
) -> Vec<EntityChange> {
    if !validate(actor, targets, payload) {
        return Vec::new();
    }
    let ActionPayload::Thrust { magnitude, direction } = payload else {
        return Vec::new();
    };

    let clamped = magnitude.clamp(Fp::ZERO, constants::max_thrust_per_tick());
    let fuel_ceiling = Fp::mul(actor.fuel_mass, constants::fuel_burn_rate());
    let effective = Fp::min(clamped, fuel_ceiling);

    let delta_v = match direction {
        Some(dir) => dir.scale(effective),
        None => trig::heading_to_vector(actor.heading, effective),
    };

    let velocity = actor.velocity.add(delta_v);
    let fuel_mass = Fp::sub(actor.fuel_mass, Fp::mul(effective, constants::fuel_burn_rate()));
    let mass = Fp::sub(actor.mass, Fp::mul(effective, constants::mass_propulsion_loss()));

    vec![EntityChange::update(
        actor.id.clone(),
        EntityChanges {
            velocity: Some(velocity),
            fuel_mass: Some(fuel_mass),
            mass: Some(mass),
            thrust: Some(effective),
            ..Default::default()
        },
    )]
}
