//! The audit repository trait (§4.6, §6.2).
//!
//! `AuditRepository` is the boundary between the pure resolution pipeline
//! (`mesh-resolver`) and durable storage. `mesh-server` is the only caller
//! in this workspace; a real implementation would back this with the
//! `ticks`, `actions`, `state_snapshots`, and `pending_actions` tables
//! described in §6.2. Only the trait and an in-memory reference
//! implementation ship here.

use mesh_model::action::Action;
use mesh_model::world::WorldState;

use crate::error::AuditError;

/// Durable storage for resolved ticks, their triggering actions, and the
/// queue of actions waiting for the next tick to begin.
///
/// `save_tick` is the atomicity boundary: either the snapshot and its
/// action log both become visible, or neither does. Calling it twice with
/// an identical snapshot for the same tick is a no-op (idempotent retry);
/// calling it twice with a *different* snapshot for the same tick is a
/// [`AuditError::TickConflict`].
pub trait AuditRepository {
    /// The highest tick number with a committed snapshot, or `None` if the
    /// repository is empty (a fresh world at tick 0 has not yet committed).
    fn get_latest_tick(&self) -> Result<Option<u64>, AuditError>;

    /// Load the committed world state at `tick`, verifying its hash.
    /// `None` if no snapshot exists at that tick.
    fn load_state(&self, tick: u64) -> Result<Option<WorldState>, AuditError>;

    /// Load the actions that were resolved to produce `tick`. Empty if the
    /// tick doesn't exist or no actions were queued for it.
    fn load_actions(&self, tick: u64) -> Result<Vec<Action>, AuditError>;

    /// Load actions queued for the tick that has not yet begun resolution.
    fn load_pending_actions(&self) -> Result<Vec<Action>, AuditError>;

    /// Queue one action for the next tick's resolution.
    fn save_pending_action(&mut self, action: Action) -> Result<(), AuditError>;

    /// Drain the pending queue, returning the actions that will be
    /// resolved for `tick`. Does not itself persist a tick -- the caller
    /// resolves them and then calls [`save_tick`](Self::save_tick).
    fn commit_pending_actions(&mut self, tick: u64) -> Result<Vec<Action>, AuditError>;

    /// Atomically persist the resolved state and the actions that produced
    /// it at `tick`.
    fn save_tick(&mut self, tick: u64, state: &WorldState, actions: &[Action]) -> Result<(), AuditError>;

    /// Flush and release any resources held by the repository. Further
    /// calls to any other method return [`AuditError::RepositoryClosed`].
    fn close(&mut self) -> Result<(), AuditError>;
}
