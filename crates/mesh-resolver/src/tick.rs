//! Wave tick resolver (§4.4, C7).

use mesh_model::action::Action;
use mesh_model::world::WorldState;

use crate::config::ResolverConfig;
use crate::wave::{group_into_waves, resolve_wave, WaveMetrics};
use crate::zoom::apply_zoom_transitions;

/// Metrics for one resolved tick: one entry per wave, in ascending order.
#[derive(Debug, Clone, Default)]
pub struct TickMetrics {
    pub waves: Vec<WaveMetrics>,
}

/// Resolve one tick: group `actions` into waves, resolve each wave's
/// conflict clusters, settle bindings between waves, then translate and
/// bind roots once at the end, reclassify zoom state, and advance the
/// tick counter. Pure in `actions` and the starting `world` -- the
/// returned `WorldState` is a new value, not a mutation of the input.
pub fn resolve_tick(world: &WorldState, actions: &[Action], config: &ResolverConfig) -> (WorldState, TickMetrics) {
    resolve(world, actions, config, false, true)
}

pub(crate) fn resolve(
    world: &WorldState,
    actions: &[Action],
    config: &ResolverConfig,
    skip_final_translation: bool,
    increment_tick: bool,
) -> (WorldState, TickMetrics) {
    let mut state = world.clone();
    let waves = group_into_waves(actions);
    let mut metrics = TickMetrics::default();

    for (order_index, wave_actions) in &waves {
        let wave_metrics = resolve_wave(&mut state, *order_index, wave_actions, config);
        metrics.waves.push(wave_metrics);
    }

    if !skip_final_translation {
        mesh_physics::apply_translation(&mut state);
        mesh_physics::apply_binding(&mut state);
    }

    apply_zoom_transitions(&mut state);

    if increment_tick {
        state.tick += 1;
    }

    (state, metrics)
}
