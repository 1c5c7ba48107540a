//! In-memory reference implementation of [`AuditRepository`] (§4.6).
//!
//! Backs `mesh-server` until a real transactional store is wired in
//! (§6.2 is interface-only per Non-goals) and is exercised directly by
//! this crate's tests and by `mesh-resolver`'s replay tests.

use std::collections::BTreeMap;

use mesh_model::action::Action;
use mesh_model::world::WorldState;

use crate::error::AuditError;
use crate::repository::AuditRepository;
use crate::snapshot::StateSnapshot;

/// An in-memory, process-local `AuditRepository`. Nothing here survives
/// the process; this exists to give `mesh-server` something to run
/// against and to give tests a cheap stand-in for a real store.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    snapshots: BTreeMap<u64, StateSnapshot>,
    actions: BTreeMap<u64, Vec<Action>>,
    pending: Vec<Action>,
    closed: bool,
}

impl InMemoryAuditRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_open(&self) -> Result<(), AuditError> {
        if self.closed {
            return Err(AuditError::RepositoryClosed);
        }
        Ok(())
    }
}

impl AuditRepository for InMemoryAuditRepository {
    fn get_latest_tick(&self) -> Result<Option<u64>, AuditError> {
        self.check_open()?;
        Ok(self.snapshots.keys().next_back().copied())
    }

    fn load_state(&self, tick: u64) -> Result<Option<WorldState>, AuditError> {
        self.check_open()?;
        let Some(snapshot) = self.snapshots.get(&tick) else {
            return Ok(None);
        };
        snapshot.verify()?;
        Ok(Some(snapshot.world.clone()))
    }

    fn load_actions(&self, tick: u64) -> Result<Vec<Action>, AuditError> {
        self.check_open()?;
        Ok(self.actions.get(&tick).cloned().unwrap_or_default())
    }

    fn load_pending_actions(&self) -> Result<Vec<Action>, AuditError> {
        self.check_open()?;
        Ok(self.pending.clone())
    }

    fn save_pending_action(&mut self, action: Action) -> Result<(), AuditError> {
        self.check_open()?;
        self.pending.push(action);
        Ok(())
    }

    fn commit_pending_actions(&mut self, _tick: u64) -> Result<Vec<Action>, AuditError> {
        self.check_open()?;
        Ok(std::mem::take(&mut self.pending))
    }

    fn save_tick(&mut self, tick: u64, state: &WorldState, actions: &[Action]) -> Result<(), AuditError> {
        self.check_open()?;
        let snapshot = StateSnapshot::capture(tick, state.clone());

        if let Some(existing) = self.snapshots.get(&tick) {
            if existing.hash == snapshot.hash {
                return Ok(()); // idempotent retry
            }
            tracing::error!(tick, existing = %existing.hash, attempted = %snapshot.hash, "refusing to overwrite committed tick");
            return Err(AuditError::TickConflict {
                tick,
                existing_hash: existing.hash.clone(),
                attempted_hash: snapshot.hash,
            });
        }

        self.snapshots.insert(tick, snapshot);
        self.actions.insert(tick, actions.to_vec());
        Ok(())
    }

    fn close(&mut self) -> Result<(), AuditError> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_fixed::{fp, Vec2Fp};
    use mesh_model::action::{ActionKind, ActionPayload};
    use mesh_model::entity::{Entity, EntityKind, ZoomState};
    use mesh_model::ids::EntityId;

    fn thrust_action(entity_id: &str) -> Action {
        Action {
            kind: ActionKind::Thrust,
            entity_id: EntityId::from(entity_id),
            player_id: None,
            order_index: 0,
            target_ids: None,
            payload: ActionPayload::Thrust { magnitude: fp(10.0), direction: None },
        }
    }

    fn entity(id: &str) -> Entity {
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

    #[test]
    fn fresh_repository_has_no_latest_tick() {
        let repo = InMemoryAuditRepository::new();
        assert_eq!(repo.get_latest_tick().unwrap(), None);
    }

    #[test]
    fn save_and_load_round_trips() {
        let mut repo = InMemoryAuditRepository::new();
        let mut world = WorldState::new("seed");
        world.upsert_entity(entity("A"));

        repo.save_tick(0, &world, &[]).unwrap();
        assert_eq!(repo.get_latest_tick().unwrap(), Some(0));
        let loaded = repo.load_state(0).unwrap().unwrap();
        assert_eq!(loaded, world);
    }

    #[test]
    fn save_tick_is_idempotent_for_identical_state() {
        let mut repo = InMemoryAuditRepository::new();
        let world = WorldState::new("seed");
        repo.save_tick(0, &world, &[]).unwrap();
        repo.save_tick(0, &world, &[]).unwrap();
    }

    #[test]
    fn save_tick_rejects_conflicting_overwrite() {
        let mut repo = InMemoryAuditRepository::new();
        let mut a = WorldState::new("seed");
        repo.save_tick(0, &a, &[]).unwrap();
        a.upsert_entity(entity("A"));
        let err = repo.save_tick(0, &a, &[]).unwrap_err();
        assert!(matches!(err, AuditError::TickConflict { tick: 0, .. }));
    }

    #[test]
    fn pending_queue_drains_on_commit() {
        let mut repo = InMemoryAuditRepository::new();
        let action = thrust_action("A");
        repo.save_pending_action(action.clone()).unwrap();
        assert_eq!(repo.load_pending_actions().unwrap(), vec![action.clone()]);

        let drained = repo.commit_pending_actions(1).unwrap();
        assert_eq!(drained, vec![action]);
        assert!(repo.load_pending_actions().unwrap().is_empty());
    }

    #[test]
    fn closed_repository_rejects_further_operations() {
        let mut repo = InMemoryAuditRepository::new();
        repo.close().unwrap();
        assert!(matches!(repo.get_latest_tick(), Err(AuditError::RepositoryClosed)));
        assert!(matches!(
            repo.save_pending_action(thrust_action("A")),
            Err(AuditError::RepositoryClosed)
        ));
    }
}
