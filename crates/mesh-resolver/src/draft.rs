//! Draft projector (§4.5, C9).
//!
//! Runs the same pipeline as [`crate::tick::resolve_tick`] with
//! `skip_final_translation=true` and no tick increment, then reports,
//! per action, whether a target has moved since the projection started
//! and whether that movement might have invalidated the actor's reach to
//! it -- useful for a client previewing a move before committing it.

use mesh_fixed::within_reach;
use mesh_model::action::Action;
use mesh_model::world::WorldState;

use crate::config::ResolverConfig;
use crate::tick::{resolve, TickMetrics};

/// Conflict analysis for a single action in the draft.
#[derive(Debug, Clone)]
pub struct DraftConflict {
    pub action_id: String,
    /// Whether any of the action's targets occupy a different position
    /// now than they did before projection began.
    pub target_moved: bool,
    /// Whether the actor's reach to at least one target may have been
    /// invalidated by position changes (in-reach at the start, out of
    /// reach now, or vice versa).
    pub reach_possibly_invalidated: bool,
}

/// Metrics for a draft projection: the underlying tick metrics plus one
/// conflict report per action.
#[derive(Debug, Clone, Default)]
pub struct DraftMetrics {
    pub tick: TickMetrics,
    pub conflicts: Vec<DraftConflict>,
}

/// Project what resolving `actions` against `world` would produce, without
/// committing a tick: no final translation, no tick counter increment.
pub fn project_draft(world: &WorldState, actions: &[Action], config: &ResolverConfig) -> (WorldState, DraftMetrics) {
    let (projected, tick_metrics) = resolve(world, actions, config, true, false);

    let conflicts = actions
        .iter()
        .map(|action| analyze_conflict(world, &projected, action))
        .collect();

    (projected, DraftMetrics { tick: tick_metrics, conflicts })
}

fn analyze_conflict(before: &WorldState, after: &WorldState, action: &Action) -> DraftConflict {
    let mut target_moved = false;
    let mut reach_possibly_invalidated = false;

    let Some(actor_before) = before.entity(&action.entity_id) else {
        return DraftConflict { action_id: action.action_id(), target_moved, reach_possibly_invalidated };
    };
    let actor_after = after.entity(&action.entity_id).unwrap_or(actor_before);

    for target_id in action.target_ids.iter().flatten() {
        let (Some(target_before), Some(target_after)) = (before.entity(target_id), after.entity(target_id)) else {
            continue;
        };
        if target_before.position != target_after.position {
            target_moved = true;
        }
        let was_in_reach = within_reach(actor_before.position, target_before.position, actor_before.reach);
        let is_in_reach = within_reach(actor_after.position, target_after.position, actor_after.reach);
        if was_in_reach != is_in_reach {
            reach_possibly_invalidated = true;
        }
    }

    DraftConflict { action_id: action.action_id(), target_moved, reach_possibly_invalidated }
}
