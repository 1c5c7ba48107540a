//! Action validators and handlers (§4.1, C4).
//!
//! Every action kind is a `(validate, handle)` pair with the same shape:
//! `validate(actor, targets, payload, ...) -> bool` and
//! `handle(actor, targets, payload, ctx) -> Vec<EntityChange>`. `handle`
//! always re-checks `validate` itself, so calling it directly on an
//! invalid action is safe and simply produces no changes. [`dispatch`] is
//! the only place that needs to know which pair goes with which
//! [`mesh_model::action::ActionKind`].

pub mod airlock;
pub mod constants;
pub mod context;
pub mod dispatch;
pub mod extract;
pub mod load;
pub mod refine;
pub mod stub;
pub mod thrust;
pub mod unload;
pub mod unweld;
pub mod update;
pub mod weld;

pub use context::TickContext;
pub use update::{apply_change, apply_changes, EntityChange, EntityChanges, EntitySpawn, EntityUpdate};
