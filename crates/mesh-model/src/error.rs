//! Model-level errors.
//!
//! These mirror the `Fatal` error class of §7: they indicate a containment
//! cycle or a negative/overcounted resource, which must be impossible if
//! the invariants of §3 are upheld. Their only purpose is a debug
//! tripwire -- surfacing one means a handler or settlement pass has a bug,
//! not that a player did something invalid.

use crate::ids::EntityId;

/// A single invariant violation detected by [`crate::invariants`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Following `parent_id` from `entity` does not terminate (I1).
    #[error("containment cycle detected starting at entity {entity}")]
    ContainmentCycle { entity: EntityId },

    /// Following `weld_parent_id` from `entity` does not terminate (I2).
    #[error("weld cycle detected starting at entity {entity}")]
    WeldCycle { entity: EntityId },

    /// `entity.position != parent.position` while contained (I3).
    #[error("entity {entity} position does not match its container's position")]
    PositionBindingViolated { entity: EntityId },

    /// `entity.position != weld_parent.position + relative_offset` (I4).
    #[error("entity {entity} position does not match its weld parent's offset position")]
    WeldOffsetViolated { entity: EntityId },

    /// Both `parent_id` and `weld_parent_id` are set on `entity` (I5).
    #[error("entity {entity} has both a containment parent and a weld parent")]
    MutualExclusionViolated { entity: EntityId },

    /// Sum of child volumes exceeds `container_volume` (I6).
    #[error("container {container} contents volume {actual} exceeds capacity {capacity}")]
    ContainmentVolumeExceeded {
        container: EntityId,
        actual: i64,
        capacity: i64,
    },

    /// `mass` does not equal dry mass plus contained/welded mass (I7).
    #[error("entity {entity} mass {actual} does not match expected {expected}")]
    MassAccountingViolated {
        entity: EntityId,
        expected: i64,
        actual: i64,
    },

    /// `fuel_mass`, `volatiles_mass`, or `mass` is negative (I8).
    #[error("entity {entity} field '{field}' is negative ({value})")]
    NegativeResource {
        entity: EntityId,
        field: &'static str,
        value: i64,
    },
}
