//! Central validator/handler table (§4.1).
//!
//! The contract every handler pair obeys: the validator runs first, and a
//! non-validating action produces an empty change list rather than an
//! error. There is no path from an `Action` to a panic here -- unknown or
//! not-yet-implemented kinds fall through to [`stub`].

use mesh_model::action::{Action, ActionKind, ActionPayload};
use mesh_model::entity::Entity;
use mesh_model::world::WorldState;

use crate::context::TickContext;
use crate::update::EntityChange;
use crate::{airlock, extract, load, refine, stub, thrust, unload, unweld, weld};

/// Resolve an action's actor and target entities against `world`. Returns
/// `None` if the actor itself does not exist -- the dispatcher treats that
/// as an empty result rather than a panic.
fn resolve<'a>(action: &Action, world: &'a WorldState) -> Option<(&'a Entity, Vec<&'a Entity>)> {
    let actor = world.entity(&action.entity_id)?;
    let targets = action
        .target_ids
        .as_ref()
        .map(|ids| ids.iter().filter_map(|id| world.entity(id)).collect())
        .unwrap_or_default();
    Some((actor, targets))
}

/// Validate an action against the current world, without producing changes.
pub fn validate(action: &Action, world: &WorldState) -> bool {
    let Some((actor, targets)) = resolve(action, world) else {
        return false;
    };
    let ctx = TickContext::new(world.tick, world);
    match (action.kind, &action.payload) {
        (ActionKind::Thrust, payload @ ActionPayload::Thrust { .. }) => thrust::validate(actor, &targets, payload),
        (ActionKind::Load, payload @ ActionPayload::Load { .. }) => load::validate(actor, &targets, payload, &ctx),
        (ActionKind::Unload, payload @ ActionPayload::Unload { .. }) => unload::validate(actor, &targets, payload, &ctx),
        (ActionKind::Weld, payload @ ActionPayload::Weld { .. }) => weld::validate(actor, &targets, payload, &ctx),
        (ActionKind::Unweld, payload @ ActionPayload::Unweld { .. }) => unweld::validate(actor, &targets, payload, &ctx),
        (ActionKind::SealAirlock, payload @ ActionPayload::SealAirlock) => airlock::validate_seal(actor, payload),
        (ActionKind::UnsealAirlock, payload @ ActionPayload::UnsealAirlock) => airlock::validate_unseal(actor, payload),
        (ActionKind::Refine, payload @ ActionPayload::Refine { .. }) => refine::validate(actor, &targets, payload),
        (ActionKind::Extract, payload @ ActionPayload::Extract { .. }) => extract::validate(actor, &targets, payload),
        _ => stub::validate(actor, &targets),
    }
}

/// Validate and, if valid, execute an action, returning its emitted
/// changes. Handlers re-validate internally, so this never applies the
/// effects of an invalid action.
pub fn handle(action: &Action, world: &WorldState) -> Vec<EntityChange> {
    let Some((actor, targets)) = resolve(action, world) else {
        return Vec::new();
    };
    let ctx = TickContext::new(world.tick, world);
    match (action.kind, &action.payload) {
        (ActionKind::Thrust, payload @ ActionPayload::Thrust { .. }) => thrust::handle(actor, &targets, payload, &ctx),
        (ActionKind::Load, payload @ ActionPayload::Load { .. }) => load::handle(actor, &targets, payload, &ctx),
        (ActionKind::Unload, payload @ ActionPayload::Unload { .. }) => unload::handle(actor, &targets, payload, &ctx),
        (ActionKind::Weld, payload @ ActionPayload::Weld { .. }) => weld::handle(actor, &targets, payload, &ctx),
        (ActionKind::Unweld, payload @ ActionPayload::Unweld { .. }) => unweld::handle(actor, &targets, payload, &ctx),
        (ActionKind::SealAirlock, payload @ ActionPayload::SealAirlock) => airlock::handle_seal(actor, &targets, payload, &ctx),
        (ActionKind::UnsealAirlock, payload @ ActionPayload::UnsealAirlock) => airlock::handle_unseal(actor, &targets, payload, &ctx),
        (ActionKind::Refine, payload @ ActionPayload::Refine { .. }) => refine::handle(actor, &targets, payload, &ctx),
        (ActionKind::Extract, payload @ ActionPayload::Extract { .. }) => extract::handle(actor, &targets, payload, &ctx),
        _ => stub::handle(actor, &targets),
    }
}
