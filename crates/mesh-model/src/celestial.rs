//! Gravitational anchors (§3, Celestials).

use mesh_fixed::{Fp, Vec2Fp};
use serde::{Deserialize, Serialize};

use crate::ids::{CelestialId, SystemId};

/// Orbital parameters shared by planets and moons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitParams {
    /// Distance from the orbit parent.
    pub orbit_radius: Fp,
    /// Current orbital angle, FP-degrees.
    pub orbit_angle: Fp,
    /// Angular speed, FP-degrees per tick.
    pub orbit_speed: Fp,
    /// The celestial this one orbits.
    pub parent_id: CelestialId,
}

/// The two endpoints of a wormhole, each a position in its own system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WormholeEndpoints {
    /// Position of the first mouth.
    pub a: Vec2Fp,
    /// Position of the second mouth.
    pub b: Vec2Fp,
}

/// Discriminates the kind of celestial. The catalogue is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CelestialKind {
    /// A star.
    Sol { position: Vec2Fp, mass: Fp },
    /// A planet, orbiting a star.
    Planet { position: Vec2Fp, mass: Fp, orbit: OrbitParams },
    /// A moon, orbiting a planet.
    Moon { position: Vec2Fp, mass: Fp, orbit: OrbitParams },
    /// An asteroid, drifting freely.
    Asteroid { position: Vec2Fp, mass: Fp, velocity: Vec2Fp },
    /// A wormhole connecting two systems.
    Wormhole {
        endpoints: WormholeEndpoints,
        system_ids: (SystemId, SystemId),
    },
}

/// A gravitational anchor: star, planet, moon, asteroid, or wormhole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Celestial {
    /// Stable unique identifier.
    pub id: CelestialId,
    /// Display name.
    pub name: String,
    /// Physical radius.
    pub radius: Fp,
    /// Radius within which orbit capture occurs.
    pub capture_radius: Fp,
    /// Layering/z-order, carried for completeness.
    pub z: Fp,
    /// The kind-specific payload.
    pub kind: CelestialKind,
}

impl Celestial {
    /// The celestial's position, if it has one (wormholes do not -- they
    /// have two endpoint positions instead).
    pub fn position(&self) -> Option<Vec2Fp> {
        match &self.kind {
            CelestialKind::Sol { position, .. }
            | CelestialKind::Planet { position, .. }
            | CelestialKind::Moon { position, .. }
            | CelestialKind::Asteroid { position, .. } => Some(*position),
            CelestialKind::Wormhole { .. } => None,
        }
    }

    /// The celestial's gravitational mass, if it has one.
    pub fn mass(&self) -> Option<Fp> {
        match &self.kind {
            CelestialKind::Sol { mass, .. }
            | CelestialKind::Planet { mass, .. }
            | CelestialKind::Moon { mass, .. }
            | CelestialKind::Asteroid { mass, .. } => Some(*mass),
            CelestialKind::Wormhole { .. } => None,
        }
    }
}

/// A star system: a named grouping of celestials and entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    /// Stable unique identifier.
    pub id: SystemId,
    /// Display name.
    pub name: String,
}
