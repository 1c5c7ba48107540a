//! Remaining action kinds (§4.1.9): TRANSPORT, MANEUVER, LAUNCH, MANUFACTURE,
//! MOD, COMMIT, VECTOR_LOCK, MOVE_SCANNER, SCAN, TRANSFER_RESOURCE, ENCOUNTER.
//!
//! None of these have a `v0` handler. They always validate false and
//! produce no updates; the dispatcher accepts them without error so that
//! unknown-to-v0 kinds round-trip harmlessly through the pipeline.

use mesh_model::entity::Entity;

use crate::update::EntityChange;

pub fn validate(_actor: &Entity, _targets: &[&Entity]) -> bool {
    false
}

pub fn handle(_actor: &Entity, _targets: &[&Entity]) -> Vec<EntityChange> {
    Vec::new()
}
