//! Opaque string identifiers.
//!
//! Entities, players, celestials and systems are all addressed by an opaque
//! string id rather than a generational handle -- unlike a conventional ECS,
//! MESH state is serialized wholesale every tick (§6.2) and ids must survive
//! that round trip unchanged. Containment and welding relations are
//! represented as these ids plus a lookup into `WorldState`, never as owning
//! pointers (§9).

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opaque_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Borrow the underlying string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

opaque_id!(EntityId, "Stable unique identifier for an entity.");
opaque_id!(PlayerId, "Stable unique identifier for an owning player.");
opaque_id!(CelestialId, "Stable unique identifier for a celestial.");
opaque_id!(SystemId, "Stable unique identifier for a star system.");
