//! Audit repository errors (§7, `PersistenceFail`).
//!
//! A `PersistenceFail` never corrupts in-memory state: the repository's
//! own contract is "write succeeds and is visible, or it fails and nothing
//! changed." These variants are how that contract reports failure.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuditError {
    /// `save_tick` was called for a tick that already has a stored
    /// snapshot whose hash disagrees with the one being saved.
    #[error("tick {tick} already committed with hash {existing_hash}, refusing to overwrite with {attempted_hash}")]
    TickConflict {
        tick: u64,
        existing_hash: String,
        attempted_hash: String,
    },

    /// A stored snapshot's content no longer matches its recorded hash.
    #[error("stored state for tick {tick} is corrupt: recorded hash {expected_hash} but recomputed {actual_hash}")]
    StateCorrupt {
        tick: u64,
        expected_hash: String,
        actual_hash: String,
    },

    /// An operation was attempted after `close()`.
    #[error("audit repository is closed")]
    RepositoryClosed,

    /// A replay log recorded the same tick twice for the same entry kind.
    #[error("replay log contains duplicate {kind} entry at tick {tick}")]
    DuplicateReplayEntry { tick: u64, kind: &'static str },

    /// `start_tick + total_ticks` overflowed `u64`.
    #[error("tick range overflow: start_tick ({start}) + total_ticks ({total}) exceeds u64::MAX")]
    TickRangeOverflow { start: u64, total: u64 },

    /// A stored value could not be encoded or decoded.
    #[error("audit repository serialization failure: {0}")]
    Serialization(String),
}
