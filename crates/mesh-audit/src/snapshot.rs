//! Content-hashed state snapshots (§4.6, §6.2 `state_snapshots`).
//!
//! A [`StateSnapshot`] is what `save_tick` durably stores: the resolved
//! world plus a BLAKE3 hex digest of it, so a later `load_state` can detect
//! storage-layer corruption by recomputing the hash rather than trusting it.

use mesh_model::world::WorldState;
use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// The world state at the end of one tick, plus its BLAKE3 content hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub tick: u64,
    pub world: WorldState,
    /// BLAKE3 hex digest (64 lowercase hex chars) of the serialized world.
    pub hash: String,
}

/// Compute the BLAKE3 hex digest of a world state.
///
/// Hashing goes through canonical JSON rather than the struct's `Debug`
/// representation or field order, so the hash is stable across process
/// restarts and across hosts (§3, canonical iteration order already makes
/// `WorldState`'s `BTreeMap`s serialize deterministically).
pub fn hash_world(world: &WorldState) -> String {
    let bytes = serde_json::to_vec(world).expect("WorldState is always JSON-serializable");
    blake3::hash(&bytes).to_hex().to_string()
}

impl StateSnapshot {
    /// Capture a snapshot of `world` at `tick`, computing its hash.
    pub fn capture(tick: u64, world: WorldState) -> Self {
        let hash = hash_world(&world);
        Self { tick, world, hash }
    }

    /// Recompute the hash from `self.world` and compare it against the
    /// recorded `self.hash`, returning [`AuditError::StateCorrupt`] on
    /// mismatch.
    pub fn verify(&self) -> Result<(), AuditError> {
        let actual = hash_world(&self.world);
        if actual != self.hash {
            return Err(AuditError::StateCorrupt {
                tick: self.tick,
                expected_hash: self.hash.clone(),
                actual_hash: actual,
            });
        }
        Ok(())
    }

    /// Encode this snapshot with `bincode` for compact durable storage
    /// (§2.x, audit-log storage of snapshots).
    pub fn to_durable_bytes(&self) -> Result<Vec<u8>, AuditError> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| AuditError::Serialization(e.to_string()))
    }

    /// Decode a snapshot previously written by [`Self::to_durable_bytes`].
    pub fn from_durable_bytes(bytes: &[u8]) -> Result<Self, AuditError> {
        let (snapshot, _len) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|e| AuditError::Serialization(e.to_string()))?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_model::world::WorldState;

    #[test]
    fn hash_is_stable_across_clones() {
        let world = WorldState::new("seed");
        assert_eq!(hash_world(&world), hash_world(&world.clone()));
    }

    #[test]
    fn verify_detects_tampering() {
        let world = WorldState::new("seed");
        let mut snapshot = StateSnapshot::capture(0, world);
        snapshot.world.tick = 7; // mutate after hashing
        assert!(matches!(snapshot.verify(), Err(AuditError::StateCorrupt { .. })));
    }

    #[test]
    fn durable_roundtrip_preserves_hash() {
        let world = WorldState::new("seed");
        let snapshot = StateSnapshot::capture(3, world);
        let bytes = snapshot.to_durable_bytes().unwrap();
        let restored = StateSnapshot::from_durable_bytes(&bytes).unwrap();
        assert_eq!(restored, snapshot);
        assert!(restored.verify().is_ok());
    }
}
