//! Conflict cluster resolver (§4.3, C6).
//!
//! Actions in a single wave that touch overlapping entities form a
//! cluster. Each cluster is resolved independently: small clusters get an
//! exhaustive permutation search, larger ones a deterministic heuristic
//! ordering, and a cluster where every ordering fails with contributions
//! from more than one player is voided outright (a stalemate).

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use mesh_actions::{apply_changes, dispatch, EntityChange};
use mesh_fixed::{distance_squared, Fp};
use mesh_model::action::Action;
use mesh_model::ids::EntityId;
use mesh_model::world::WorldState;

use crate::config::ResolverConfig;

/// Outcome of resolving one conflict cluster.
#[derive(Debug, Clone, Default)]
pub struct ClusterMetrics {
    /// Stable ids of every action in the cluster, in wave order.
    pub action_ids: Vec<String>,
    /// Stable ids of the actions that actually produced changes, in the
    /// order they were committed.
    pub executed_action_ids: Vec<String>,
    /// Whether the cluster was voided as a stalemate.
    pub stalemate: bool,
    /// Whether the permutation search aborted early and fell back to the
    /// heuristic ordering.
    pub budget_exceeded: bool,
}

/// A resolved cluster: its metrics plus the changes to merge into the wave.
#[derive(Debug, Clone, Default)]
pub struct ClusterOutcome {
    pub metrics: ClusterMetrics,
    pub changes: Vec<EntityChange>,
}

/// Partition `actions` into connected components by shared touched entity.
/// Returned groups are lists of indices into `actions`, each in ascending
/// index order.
pub fn build_clusters(actions: &[&Action]) -> Vec<Vec<usize>> {
    let mut parent: Vec<usize> = (0..actions.len()).collect();

    fn find(parent: &mut [usize], x: usize) -> usize {
        if parent[x] != x {
            parent[x] = find(parent, parent[x]);
        }
        parent[x]
    }

    fn union(parent: &mut [usize], a: usize, b: usize) {
        let ra = find(parent, a);
        let rb = find(parent, b);
        if ra != rb {
            parent[ra.max(rb)] = ra.min(rb);
        }
    }

    let mut owner: HashMap<EntityId, usize> = HashMap::new();
    for (i, action) in actions.iter().enumerate() {
        for entity in action.touched_entities() {
            match owner.get(&entity) {
                Some(&other) => union(&mut parent, i, other),
                None => {
                    owner.insert(entity, i);
                }
            }
        }
    }

    let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
    for i in 0..actions.len() {
        let root = find(&mut parent, i);
        groups.entry(root).or_default().push(i);
    }

    let mut clusters: Vec<Vec<usize>> = groups.into_values().collect();
    clusters.sort_by_key(|g| g[0]);
    clusters
}

/// Deterministic fallback ordering: stable sort by `(orderIndex, playerId,
/// entityId)`.
fn heuristic_order(actions: &[&Action]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..actions.len()).collect();
    indices.sort_by(|&a, &b| {
        let aa = actions[a];
        let bb = actions[b];
        aa.order_index
            .cmp(&bb.order_index)
            .then_with(|| {
                let ap = aa.player_id.as_ref().map(|p| p.as_str()).unwrap_or("");
                let bp = bb.player_id.as_ref().map(|p| p.as_str()).unwrap_or("");
                ap.cmp(bp)
            })
            .then_with(|| aa.entity_id.as_str().cmp(bb.entity_id.as_str()))
    });
    indices
}

/// Every permutation of `0..n`, generated via iterative Heap's algorithm.
/// Only used below `PERM_THRESHOLD`, so `n! <= 720`.
fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    let mut items: Vec<usize> = (0..n).collect();
    let mut c = vec![0usize; n];
    result.push(items.clone());
    let mut i = 0;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                items.swap(0, i);
            } else {
                items.swap(c[i], i);
            }
            result.push(items.clone());
            c[i] += 1;
            i = 0;
        } else {
            c[i] = 0;
            i += 1;
        }
    }
    result
}

struct SimResult {
    success_count: usize,
    sq_displacement: Fp,
    changes: Vec<EntityChange>,
    executed_action_ids: Vec<String>,
}

fn simulate(world: &WorldState, ordering: &[usize], cluster_actions: &[&Action]) -> SimResult {
    let mut scratch = world.clone();
    let mut success_count = 0;
    let mut changes = Vec::new();
    let mut executed_action_ids = Vec::new();

    for &idx in ordering {
        let action = cluster_actions[idx];
        let action_changes = dispatch::handle(action, &scratch);
        if action_changes.is_empty() {
            continue;
        }
        apply_changes(&mut scratch, &action_changes);
        changes.extend(action_changes);
        success_count += 1;
        executed_action_ids.push(action.action_id());
    }

    let touched: HashSet<EntityId> = cluster_actions
        .iter()
        .flat_map(|a| a.touched_entities())
        .collect();
    let mut sq_displacement = Fp::ZERO;
    for id in &touched {
        if let (Some(before), Some(after)) = (world.entity(id), scratch.entity(id)) {
            sq_displacement = Fp::add(sq_displacement, distance_squared(before.position, after.position));
        }
    }

    SimResult { success_count, sq_displacement, changes, executed_action_ids }
}

/// Lower is better: `(−success_count, sq_displacement, action id sequence)`.
fn score_key(result: &SimResult) -> (i64, i64, String) {
    (
        -(result.success_count as i64),
        result.sq_displacement.raw(),
        result.executed_action_ids.join(","),
    )
}

/// Resolve one cluster against `world`, returning the changes to apply and
/// the metrics describing how it was resolved.
pub fn resolve_cluster(world: &WorldState, cluster_actions: &[&Action], config: &ResolverConfig) -> ClusterOutcome {
    let action_ids: Vec<String> = cluster_actions.iter().map(|a| a.action_id()).collect();
    let heuristic = heuristic_order(cluster_actions);

    let mut budget_exceeded = false;
    let candidates: Vec<Vec<usize>> = if cluster_actions.len() <= config.perm_threshold {
        let start = Instant::now();
        let mut perms = Vec::new();
        for perm in permutations(cluster_actions.len()) {
            if start.elapsed() > config.perm_time_budget {
                budget_exceeded = true;
                break;
            }
            perms.push(perm);
        }
        if budget_exceeded {
            tracing::debug!(size = cluster_actions.len(), "permutation search exceeded time budget, falling back to heuristic order");
            vec![heuristic]
        } else {
            perms
        }
    } else {
        vec![heuristic]
    };

    let results: Vec<SimResult> = candidates.iter().map(|ordering| simulate(world, ordering, cluster_actions)).collect();

    let distinct_players: HashSet<&str> = cluster_actions
        .iter()
        .filter_map(|a| a.player_id.as_ref().map(|p| p.as_str()))
        .collect();
    let all_failed = results.iter().all(|r| r.success_count == 0);

    if all_failed && distinct_players.len() >= 2 {
        tracing::warn!(actions = ?action_ids, "cluster stalemated, voiding all actions");
        return ClusterOutcome {
            metrics: ClusterMetrics {
                action_ids,
                executed_action_ids: Vec::new(),
                stalemate: true,
                budget_exceeded,
            },
            changes: Vec::new(),
        };
    }

    let best = results
        .into_iter()
        .min_by(|a, b| score_key(a).cmp(&score_key(b)))
        .expect("at least one candidate ordering always exists");

    ClusterOutcome {
        metrics: ClusterMetrics {
            action_ids,
            executed_action_ids: best.executed_action_ids,
            stalemate: false,
            budget_exceeded,
        },
        changes: best.changes,
    }
}
