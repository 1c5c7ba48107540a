//! The read-only context every handler and validator receives.

use mesh_model::world::WorldState;

/// Everything a handler is allowed to see beyond its own arguments: the
/// current tick number and a read-only view of the whole world (§4.1).
///
/// A handler's output depends only on its arguments -- no clocks, no
/// randomness, no hidden state -- so `TickContext` carries nothing beyond
/// what §4.1 explicitly grants.
pub struct TickContext<'a> {
    /// The tick currently being resolved.
    pub tick: u64,
    /// Read-only view of all entities and celestials.
    pub world: &'a WorldState,
}

impl<'a> TickContext<'a> {
    /// Construct a context for the given tick and world snapshot.
    pub fn new(tick: u64, world: &'a WorldState) -> Self {
        Self { tick, world }
    }
}
