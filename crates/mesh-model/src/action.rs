//! The action catalogue (§3, Actions) and per-kind typed payloads.
//!
//! The source system passes a `map<string, any>` of action inputs; this
//! crate instead defines a tagged-variant [`ActionPayload`] per action kind
//! and decodes it once at the transport boundary, so the resolution hot
//! path only ever sees typed payloads (§9, Design Notes).

use mesh_fixed::{Fp, Vec2Fp};
use serde::{Deserialize, Serialize};

use crate::ids::{EntityId, PlayerId};

/// The closed catalogue of action kinds. Kinds without a `v0` handler still
/// round-trip through this enum; the dispatcher treats them as
/// validate-to-false stubs (§4.1.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Thrust,
    Maneuver,
    Transport,
    Launch,
    Extract,
    Refine,
    Manufacture,
    Weld,
    Unweld,
    Mod,
    Commit,
    SealAirlock,
    UnsealAirlock,
    Load,
    Unload,
    VectorLock,
    MoveScanner,
    Scan,
    TransferResource,
    Encounter,
}

impl ActionKind {
    /// Whether this kind has a `v0` handler (§4.1.1-4.1.8). Kinds not
    /// listed here are accepted but always validate to `false` (§4.1.9).
    pub fn is_implemented(self) -> bool {
        matches!(
            self,
            ActionKind::Thrust
                | ActionKind::Load
                | ActionKind::Unload
                | ActionKind::Weld
                | ActionKind::Unweld
                | ActionKind::SealAirlock
                | ActionKind::UnsealAirlock
                | ActionKind::Refine
                | ActionKind::Extract
        )
    }
}

/// Which resource an EXTRACT action draws from its targets (§4.1.8).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExtractPath {
    /// Transfer `min(rate, origin.volatiles_mass)` from each in-reach
    /// origin to the actor.
    Volatiles { rate: Fp },
    /// Reduce the origin's mass by `amount` and spawn a new `MineralStore`
    /// entity at `mineral_target_position`.
    Minerals {
        amount: Fp,
        mineral_target_position: Vec2Fp,
    },
}

/// Per-kind typed inputs. Stub kinds (§4.1.9) carry no payload at all --
/// the dispatcher never inspects them, since they always validate false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionPayload {
    Thrust {
        magnitude: Fp,
        direction: Option<Vec2Fp>,
    },
    Load {
        content_ids: Vec<EntityId>,
        container_id: EntityId,
    },
    Unload {
        content_ids: Vec<EntityId>,
        new_positions: Vec<Vec2Fp>,
    },
    Weld {
        target_ids: Vec<EntityId>,
    },
    Unweld {
        target_ids: Vec<EntityId>,
    },
    SealAirlock,
    UnsealAirlock,
    Refine {
        volatiles_amount: Fp,
    },
    Extract {
        path: ExtractPath,
    },
    /// Carried verbatim for kinds with no `v0` payload shape yet
    /// (§4.1.9) -- the dispatcher never decodes this.
    Stub(serde_json::Value),
}

/// A single queued action (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Which action kind this is.
    pub kind: ActionKind,
    /// The acting entity.
    pub entity_id: EntityId,
    /// The player who issued the action, if any.
    pub player_id: Option<PlayerId>,
    /// Which wave this action belongs to. Defaults to `0`.
    pub order_index: u32,
    /// Target entity ids, if any.
    pub target_ids: Option<Vec<EntityId>>,
    /// Kind-specific payload.
    pub payload: ActionPayload,
}

impl Action {
    /// Every entity this action touches: the actor plus its targets. Used
    /// by the conflict cluster graph (§4.3) to detect overlapping actions.
    pub fn touched_entities(&self) -> Vec<EntityId> {
        let mut touched = vec![self.entity_id.clone()];
        if let Some(targets) = &self.target_ids {
            touched.extend(targets.iter().cloned());
        }
        touched
    }

    /// A stable, lexicographically comparable id used to break ties in the
    /// conflict resolver's scoring (§4.3 step 2b).
    pub fn action_id(&self) -> String {
        format!(
            "{:?}:{}:{}",
            self.kind,
            self.entity_id,
            self.player_id
                .as_ref()
                .map(|p| p.as_str())
                .unwrap_or("")
        )
    }
}
