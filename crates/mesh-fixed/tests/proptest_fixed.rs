use mesh_fixed::{fp_raw, Fp};
use proptest::prelude::*;

proptest! {
    #[test]
    fn div_never_panics(a in any::<i64>(), b in any::<i64>()) {
        let _ = Fp::div(fp_raw(a), fp_raw(b));
    }

    #[test]
    fn mul_never_panics(a in any::<i64>(), b in any::<i64>()) {
        let _ = Fp::mul(fp_raw(a), fp_raw(b));
    }

    #[test]
    fn div_by_zero_is_always_zero(a in any::<i64>()) {
        prop_assert_eq!(Fp::div(fp_raw(a), Fp::ZERO), Fp::ZERO);
    }

    #[test]
    fn clamp_result_within_bounds(v in any::<i64>(), lo in -1_000_000i64..1_000_000, span in 0i64..1_000_000) {
        let hi = lo + span;
        let clamped = fp_raw(v).clamp(fp_raw(lo), fp_raw(hi));
        prop_assert!(clamped.raw() >= lo && clamped.raw() <= hi);
    }
}
