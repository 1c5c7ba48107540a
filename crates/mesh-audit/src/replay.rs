//! Deterministic replay with action recording and checkpoint verification
//! (§4.6, §8 P1).
//!
//! A [`ReplayLog`] pairs an initial world state with the sequence of
//! actions applied per tick and periodic state-hash checkpoints. Feeding
//! the log back through [`replay`] re-resolves each tick with
//! `mesh_resolver::resolve_tick` and compares the resulting hash against
//! the recorded one, so a divergence in the resolver (a platform bug, a
//! non-deterministic handler) surfaces as a specific failing tick rather
//! than a generic "output doesn't match".

use std::collections::BTreeMap;

use mesh_model::action::Action;
use mesh_model::world::WorldState;
use mesh_resolver::ResolverConfig;
use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::snapshot::hash_world;

/// A complete replay log: the starting state plus an ordered sequence of
/// per-tick actions and hash checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayLog {
    /// The world state at the start of recording.
    pub initial_state: WorldState,
    /// Total number of ticks recorded. Replay executes exactly this many
    /// ticks from `initial_state.tick`, regardless of how many entries
    /// exist.
    pub total_ticks: u64,
    /// Ordered sequence of replay entries.
    pub entries: Vec<ReplayEntry>,
}

/// A single entry in a [`ReplayLog`]: either the actions resolved at a
/// tick, or a state-hash checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReplayEntry {
    /// The actions that were resolved to produce the state at `tick + 1`.
    Actions { tick: u64, actions: Vec<Action> },
    /// The BLAKE3 hex digest of the world state at `tick`, recorded before
    /// that tick's actions were resolved.
    Checkpoint { tick: u64, state_hash: String },
}

/// The outcome of replaying a [`ReplayLog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayResult {
    pub completed: bool,
    pub ticks_replayed: u64,
    /// The first checkpoint where the replayed hash didn't match the
    /// recorded one. `None` if every checkpoint matched.
    pub first_divergence: Option<ReplayDivergence>,
}

/// Details of a determinism failure detected during replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayDivergence {
    pub tick: u64,
    pub expected_hash: String,
    pub actual_hash: String,
}

/// Records a run into a [`ReplayLog`].
///
/// Call [`record_tick`](Self::record_tick) once per resolved tick, in
/// strictly increasing tick order, then [`finish`](Self::finish) to
/// produce the log.
pub struct ReplayRecorder {
    log: ReplayLog,
    checkpoint_interval: u64,
    ticks_recorded: u64,
    last_tick: Option<u64>,
}

impl ReplayRecorder {
    /// `checkpoint_interval` of `0` means "checkpoint every tick a hash is
    /// supplied for"; otherwise a checkpoint is recorded only on ticks
    /// divisible by the interval.
    pub fn new(initial_state: WorldState, checkpoint_interval: u64) -> Self {
        Self {
            log: ReplayLog { initial_state, total_ticks: 0, entries: Vec::new() },
            checkpoint_interval,
            ticks_recorded: 0,
            last_tick: None,
        }
    }

    /// Record one resolved tick.
    ///
    /// # Panics
    ///
    /// Panics if `tick` is not strictly greater than the tick supplied in
    /// the previous call.
    pub fn record_tick(&mut self, tick: u64, actions: &[Action], state_hash: Option<String>) {
        if let Some(prev) = self.last_tick {
            assert!(
                tick > prev,
                "ReplayRecorder::record_tick: tick {tick} is not strictly greater than previous tick {prev}"
            );
        }
        self.last_tick = Some(tick);
        self.ticks_recorded += 1;

        if !actions.is_empty() {
            self.log.entries.push(ReplayEntry::Actions { tick, actions: actions.to_vec() });
        }

        if let Some(hash) = state_hash {
            let should_checkpoint = self.checkpoint_interval == 0 || tick % self.checkpoint_interval == 0;
            if should_checkpoint {
                self.log.entries.push(ReplayEntry::Checkpoint { tick, state_hash: hash });
            }
        }
    }

    pub fn finish(mut self) -> ReplayLog {
        self.log.total_ticks = self.ticks_recorded;
        self.log
    }
}

/// Replay `log` from its initial state, verifying determinism at each
/// checkpoint.
///
/// Validates the log before touching the resolver: duplicate entries at a
/// tick and tick-range overflow are rejected up front. Replay stops at the
/// first divergence but still reports ticks successfully replayed up to
/// that point.
pub fn replay(log: &ReplayLog, config: &ResolverConfig) -> Result<ReplayResult, AuditError> {
    let mut action_map: BTreeMap<u64, Vec<Action>> = BTreeMap::new();
    let mut checkpoint_map: BTreeMap<u64, String> = BTreeMap::new();

    for entry in &log.entries {
        match entry {
            ReplayEntry::Actions { tick, actions } => {
                if action_map.contains_key(tick) {
                    return Err(AuditError::DuplicateReplayEntry { tick: *tick, kind: "Actions" });
                }
                action_map.insert(*tick, actions.clone());
            }
            ReplayEntry::Checkpoint { tick, state_hash } => {
                if checkpoint_map.contains_key(tick) {
                    return Err(AuditError::DuplicateReplayEntry { tick: *tick, kind: "Checkpoint" });
                }
                checkpoint_map.insert(*tick, state_hash.clone());
            }
        }
    }

    let start_tick = log.initial_state.tick;
    if log.total_ticks == 0 {
        return Ok(ReplayResult { completed: true, ticks_replayed: 0, first_divergence: None });
    }
    let end_tick = start_tick
        .checked_add(log.total_ticks)
        .ok_or(AuditError::TickRangeOverflow { start: start_tick, total: log.total_ticks })?;

    let mut world = log.initial_state.clone();
    let mut ticks_replayed = 0u64;

    for tick in start_tick..end_tick {
        if let Some(expected_hash) = checkpoint_map.get(&tick) {
            let actual_hash = hash_world(&world);
            if &actual_hash != expected_hash {
                tracing::error!(tick, expected = %expected_hash, actual = %actual_hash, "replay diverged");
                return Ok(ReplayResult {
                    completed: false,
                    ticks_replayed,
                    first_divergence: Some(ReplayDivergence {
                        tick,
                        expected_hash: expected_hash.clone(),
                        actual_hash,
                    }),
                });
            }
        }

        let actions = action_map.get(&tick).cloned().unwrap_or_default();
        let (next, _metrics) = mesh_resolver::resolve_tick(&world, &actions, config);
        world = next;
        ticks_replayed += 1;
    }

    Ok(ReplayResult { completed: true, ticks_replayed, first_divergence: None })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_fixed::{fp, Vec2Fp};
    use mesh_model::action::{ActionKind, ActionPayload};
    use mesh_model::entity::{Entity, EntityKind, ZoomState};
    use mesh_model::ids::EntityId;

    fn base_entity(id: &str) -> Entity {
        Entity {
            id: EntityId::from(id),
            kind: EntityKind::Generic,
            player_id: None,
            position: Vec2Fp::ZERO,
            velocity: Vec2Fp::ZERO,
            heading: fp(0.0),
            thrust: fp(0.0),
            mass: fp(1000.0),
            volume: fp(10.0),
            fuel_mass: fp(200.0),
            volatiles_mass: fp(0.0),
            reach: fp(50.0),
            airlock_sealed: false,
            optic_level: 0,
            parent_id: None,
            is_container: false,
            container_volume: fp(0.0),
            in_opacity: fp(0.0),
            weld_parent_id: None,
            relative_offset: None,
            orbit_target_id: None,
            zoom_state: ZoomState::Space,
        }
    }

    fn thrust(entity_id: &str) -> Action {
        Action {
            kind: ActionKind::Thrust,
            entity_id: EntityId::from(entity_id),
            player_id: None,
            order_index: 0,
            target_ids: None,
            payload: ActionPayload::Thrust { magnitude: fp(10.0), direction: None },
        }
    }

    #[test]
    fn replay_of_a_clean_recording_never_diverges() {
        let mut world = WorldState::new("seed");
        world.upsert_entity(base_entity("A"));
        let config = ResolverConfig::default();

        let mut recorder = ReplayRecorder::new(world.clone(), 1);
        for tick in 0..3u64 {
            let actions = vec![thrust("A")];
            let hash = hash_world(&world);
            recorder.record_tick(tick, &actions, Some(hash));
            let (next, _) = mesh_resolver::resolve_tick(&world, &actions, &config);
            world = next;
        }
        let log = recorder.finish();

        let result = replay(&log, &config).unwrap();
        assert!(result.completed);
        assert!(result.first_divergence.is_none());
        assert_eq!(result.ticks_replayed, 3);
    }

    #[test]
    fn replay_detects_a_tampered_checkpoint() {
        let mut world = WorldState::new("seed");
        world.upsert_entity(base_entity("A"));
        let config = ResolverConfig::default();

        let mut recorder = ReplayRecorder::new(world.clone(), 1);
        let actions = vec![thrust("A")];
        recorder.record_tick(0, &actions, Some("not-the-real-hash".to_owned()));
        let log = recorder.finish();

        let result = replay(&log, &config).unwrap();
        assert!(!result.completed);
        assert!(result.first_divergence.is_some());
    }

    #[test]
    fn empty_log_replays_trivially() {
        let world = WorldState::new("seed");
        let recorder = ReplayRecorder::new(world, 1);
        let log = recorder.finish();
        let result = replay(&log, &ResolverConfig::default()).unwrap();
        assert!(result.completed);
        assert_eq!(result.ticks_replayed, 0);
    }
}
