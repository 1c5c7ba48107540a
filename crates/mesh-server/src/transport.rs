//! Wire frame types and the transport boundary (§6.1).
//!
//! No concrete socket implementation ships here (Non-goal) -- the frame
//! enums and the [`Transport`] trait are the deliverable. A real
//! implementation (WebSocket, TCP, Unix socket) wraps whatever async I/O
//! it needs around `recv`/`send`; this crate only describes the contract.
//! Frames round-trip through `serde_json` so fixed-point integers cross
//! the wire as plain JSON integers, never floats.

use mesh_model::action::Action;
use mesh_model::world::WorldState;
use serde::{Deserialize, Serialize};

/// A frame sent from a client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundFrame {
    /// Ask for the current (or a historical) world state.
    #[serde(rename = "CMD_REQUEST_STATE")]
    RequestState {
        /// `None` requests the latest committed tick.
        tick: Option<u64>,
    },
    /// Queue an action for the next tick's resolution.
    #[serde(rename = "CMD_QUEUE_ACTION")]
    QueueAction { action: Action },
    /// Request that the next tick be resolved now.
    #[serde(rename = "CMD_EXECUTE_TICK")]
    ExecuteTick,
}

/// A frame sent from the server to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundFrame {
    /// Reply to `CMD_REQUEST_STATE`.
    #[serde(rename = "STATE_UPDATE")]
    StateUpdate { tick: u64, state: WorldState },
    /// Broadcast after a tick has been resolved and persisted.
    #[serde(rename = "TICK_EXECUTED")]
    TickExecuted { tick: u64 },
    /// Broadcast when the pending action queue changes.
    #[serde(rename = "PENDING_ACTIONS_UPDATE")]
    PendingActionsUpdate { actions: Vec<Action> },
    /// A rejected or malformed request (§7, `TransportInvariant`).
    #[serde(rename = "ERROR")]
    Error { message: String },
}

/// The request/response contract a concrete transport implements.
///
/// Implementations own whatever connection state they need (a socket, a
/// channel, a test double); this trait only describes how the server
/// wiring exchanges frames with it.
pub trait Transport {
    /// Receive the next inbound frame, if one is available. `Ok(None)`
    /// means no frame is currently pending, not that the connection closed.
    fn recv(&mut self) -> anyhow::Result<Option<InboundFrame>>;

    /// Send an outbound frame to the client(s) this transport represents.
    fn send(&mut self, frame: OutboundFrame) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_fixed::fp;
    use mesh_model::action::{ActionKind, ActionPayload};
    use mesh_model::ids::EntityId;

    #[test]
    fn inbound_queue_action_round_trips_through_json() {
        let frame = InboundFrame::QueueAction {
            action: Action {
                kind: ActionKind::Thrust,
                entity_id: EntityId::from("A"),
                player_id: None,
                order_index: 0,
                target_ids: None,
                payload: ActionPayload::Thrust { magnitude: fp(10.0), direction: None },
            },
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"type\":\"CMD_QUEUE_ACTION\""));
        let back: InboundFrame = serde_json::from_str(&json).unwrap();
        matches!(back, InboundFrame::QueueAction { .. });
    }

    #[test]
    fn outbound_error_round_trips_through_json() {
        let frame = OutboundFrame::Error { message: "stale tick".to_owned() };
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"type\":\"ERROR\""));
        let back: OutboundFrame = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, OutboundFrame::Error { message } if message == "stale tick"));
    }
}
