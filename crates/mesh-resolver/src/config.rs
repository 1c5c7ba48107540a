//! Tunable resolver parameters (§4.3, §5).

use std::time::Duration;

/// Parameters governing conflict cluster resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Clusters at or below this size get exhaustive permutation search;
    /// larger clusters fall back to the heuristic ordering directly.
    pub perm_threshold: usize,
    /// Wall-clock budget for a single cluster's permutation search. Does
    /// not affect the *outcome* of clusters below the threshold that
    /// finish in time, and falls back to the same heuristic ordering every
    /// oversized cluster already uses -- so timing this does not introduce
    /// cross-host nondeterminism in the resolved state, only in which
    /// clusters get flagged `budget_exceeded` in diagnostics.
    pub perm_time_budget: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            perm_threshold: 6,
            perm_time_budget: Duration::from_millis(50),
        }
    }
}
