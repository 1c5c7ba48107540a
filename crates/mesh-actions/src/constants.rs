//! Tunable constants referenced by the §4.1 handlers.
//!
//! These are the same constants the scenario fixtures in §8 pin down
//! (e.g. S1's `FUEL_BURN_RATE=1`); they are grouped here rather than
//! scattered across handler modules so a balance pass touches one file.

use mesh_fixed::{fp, Fp};

/// THRUST validator rejects actors at or below this fuel level.
pub fn minimum_fuel_threshold() -> Fp {
    fp(0.0)
}

/// THRUST magnitude is clamped to this ceiling before the fuel-starve clamp.
pub fn max_thrust_per_tick() -> Fp {
    fp(100.0)
}

/// Fuel consumed per unit of effective thrust magnitude.
pub fn fuel_burn_rate() -> Fp {
    fp(1.0)
}

/// Dry mass lost per unit of effective thrust magnitude (propulsion loss).
pub fn mass_propulsion_loss() -> Fp {
    fp(1.0)
}

/// REFINE processes at most this much volatiles mass per action.
pub fn refine_max_batch() -> Fp {
    fp(1_000_000.0)
}

/// Fraction of refined volatiles mass converted to fuel (the rest is waste).
pub fn refine_efficiency() -> Fp {
    fp(0.8)
}
