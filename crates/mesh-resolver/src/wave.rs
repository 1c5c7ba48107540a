//! Wave grouping (§4.4 step 1-2).

use std::collections::BTreeMap;

use mesh_actions::apply_changes;
use mesh_model::action::Action;
use mesh_model::world::WorldState;

use crate::cluster::{build_clusters, resolve_cluster, ClusterMetrics};
use crate::config::ResolverConfig;

/// Metrics for a single wave: its index, how many actions it held, and
/// each of its clusters' outcomes.
#[derive(Debug, Clone, Default)]
pub struct WaveMetrics {
    pub order_index: u32,
    pub action_count: usize,
    pub clusters: Vec<ClusterMetrics>,
}

/// Group `actions` by `order_index` into ascending waves (§4.4 step 1).
pub fn group_into_waves(actions: &[Action]) -> BTreeMap<u32, Vec<&Action>> {
    let mut waves: BTreeMap<u32, Vec<&Action>> = BTreeMap::new();
    for action in actions {
        waves.entry(action.order_index).or_default().push(action);
    }
    waves
}

/// Resolve one wave's actions against `world`, mutating it in place with
/// the winning changes from every cluster, then applying binding only
/// (§4.4 step 2 -- translation must not run here).
pub fn resolve_wave(world: &mut WorldState, order_index: u32, actions: &[&Action], config: &ResolverConfig) -> WaveMetrics {
    let clusters = build_clusters(actions);
    let mut cluster_metrics = Vec::with_capacity(clusters.len());

    for cluster in clusters {
        let cluster_actions: Vec<&Action> = cluster.iter().map(|&i| actions[i]).collect();
        let outcome = resolve_cluster(world, &cluster_actions, config);
        apply_changes(world, &outcome.changes);
        cluster_metrics.push(outcome.metrics);
    }

    mesh_physics::apply_binding(world);

    WaveMetrics {
        order_index,
        action_count: actions.len(),
        clusters: cluster_metrics,
    }
}
