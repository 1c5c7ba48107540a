//! Discriminated data model for MESH: entities, celestials, world state,
//! and the action catalogue (§3).
//!
//! This crate carries no behavior of its own beyond invariant checking
//! (`invariants`) -- action semantics live in `mesh-actions`, settlement in
//! `mesh-physics`, and tick orchestration in `mesh-resolver`.
//!
//! # Example
//!
//! ```
//! use mesh_model::entity::{Entity, EntityKind, ZoomState};
//! use mesh_model::ids::EntityId;
//! use mesh_model::world::WorldState;
//! use mesh_fixed::{fp, Vec2Fp};
//!
//! let mut world = WorldState::new("seed-1");
//! world.upsert_entity(Entity {
//!     id: EntityId::from("ship-a"),
//!     kind: EntityKind::Generic,
//!     player_id: None,
//!     position: Vec2Fp::ZERO,
//!     velocity: Vec2Fp::ZERO,
//!     heading: fp(0.0),
//!     thrust: fp(0.0),
//!     mass: fp(1000.0),
//!     volume: fp(10.0),
//!     fuel_mass: fp(200.0),
//!     volatiles_mass: fp(0.0),
//!     reach: fp(50.0),
//!     airlock_sealed: false,
//!     optic_level: 1,
//!     parent_id: None,
//!     is_container: false,
//!     container_volume: fp(0.0),
//!     in_opacity: fp(0.0),
//!     weld_parent_id: None,
//!     relative_offset: None,
//!     orbit_target_id: None,
//!     zoom_state: ZoomState::Space,
//! });
//! assert!(mesh_model::invariants::check_all(&world).is_empty());
//! ```

#![deny(unsafe_code)]

pub mod action;
pub mod celestial;
pub mod entity;
pub mod error;
pub mod ids;
pub mod invariants;
pub mod world;

pub use error::ModelError;
