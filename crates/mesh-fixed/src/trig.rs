//! Table-based heading/trig conversion.
//!
//! `heading_to_vector` is the only permitted transcendental on the
//! resolution hot path (§5). It looks up a precomputed table of cos/sin
//! pairs at 0.1° resolution (3600 entries covering `[0, 360)`) and linearly
//! interpolates between the two bracketing entries for sub-0.1° angles,
//! rather than calling `f64::sin`/`f64::cos` directly -- different libm
//! implementations can disagree in the last bit, which would break
//! cross-host determinism.

use crate::{fp, Fp, Vec2Fp, SCALE};

/// Number of table entries, one per 0.1 degree over `[0, 360)`.
pub const TABLE_ENTRIES: usize = 3600;

/// `angle_fp` units per table entry (0.1 degree == `SCALE / 10` angle-FP units).
const UNITS_PER_ENTRY: i64 = SCALE / 10;

/// One full turn in angle-FP units (FP-degrees on `[0, 360_000)`).
pub const FULL_TURN_FP: i64 = 360 * SCALE;

fn build_table() -> Vec<(Fp, Fp)> {
    (0..TABLE_ENTRIES)
        .map(|i| {
            let degrees = i as f64 * 0.1;
            let radians = degrees.to_radians();
            (fp(radians.cos()), fp(radians.sin()))
        })
        .collect()
}

thread_local! {
    static TABLE: Vec<(Fp, Fp)> = build_table();
}

/// Normalize an angle-FP value into `[0, FULL_TURN_FP)`.
fn normalize_angle(angle_fp: i64) -> i64 {
    let mut a = angle_fp % FULL_TURN_FP;
    if a < 0 {
        a += FULL_TURN_FP;
    }
    a
}

/// Look up `(cos, sin)` for an angle given in FP-degrees, interpolating
/// linearly between the two bracketing 0.1°-resolution table entries.
pub fn cos_sin(angle_fp: Fp) -> (Fp, Fp) {
    let normalized = normalize_angle(angle_fp.raw());
    let entry_pos = normalized / UNITS_PER_ENTRY;
    let remainder = normalized % UNITS_PER_ENTRY;
    let lo_index = (entry_pos as usize) % TABLE_ENTRIES;
    let hi_index = (lo_index + 1) % TABLE_ENTRIES;

    TABLE.with(|table| {
        let (cos_lo, sin_lo) = table[lo_index];
        let (cos_hi, sin_hi) = table[hi_index];
        if remainder == 0 {
            return (cos_lo, sin_lo);
        }
        let t = Fp::div(Fp(remainder), Fp(UNITS_PER_ENTRY));
        let cos = Fp::add(cos_lo, Fp::mul(Fp::sub(cos_hi, cos_lo), t));
        let sin = Fp::add(sin_lo, Fp::mul(Fp::sub(sin_hi, sin_lo), t));
        (cos, sin)
    })
}

/// Convert a heading (FP-degrees, `0` facing `+X`, increasing counter-
/// clockwise) and a magnitude into a world-space displacement vector.
pub fn heading_to_vector(heading_fp: Fp, magnitude_fp: Fp) -> Vec2Fp {
    let (cos, sin) = cos_sin(heading_fp);
    Vec2Fp::new(Fp::mul(cos, magnitude_fp), Fp::mul(sin, magnitude_fp))
}
