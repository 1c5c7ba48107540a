//! Audit/persistence boundary for MESH (§4.6, C8).
//!
//! [`AuditRepository`] is the trait `mesh-server` drives; [`InMemoryAuditRepository`]
//! is the reference implementation used by tests and until a real
//! transactional store is wired in. [`snapshot`] provides BLAKE3 content
//! hashing of [`mesh_model::world::WorldState`], and [`replay`] re-resolves
//! a recorded run tick-by-tick to catch determinism regressions.

#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod replay;
pub mod repository;
pub mod snapshot;

pub use error::AuditError;
pub use memory::InMemoryAuditRepository;
pub use replay::{replay as replay_log, ReplayDivergence, ReplayEntry, ReplayLog, ReplayRecorder, ReplayResult};
pub use repository::AuditRepository;
pub use snapshot::{hash_world, StateSnapshot};
