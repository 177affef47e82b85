use proptest::prelude::*;
use sb_core::{mean, sample_std, z_score};

proptest! {
    #[test]
    fn mean_lies_within_range(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..64)) {
        let m = mean(&values).unwrap();
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(m >= lo - 1e-6 && m <= hi + 1e-6);
    }

    #[test]
    fn constant_series_has_no_spread(v in -1.0e3f64..1.0e3, n in 2usize..64) {
        let values = vec![v; n];
        let s = sample_std(&values).unwrap();
        prop_assert!(s.abs() < 1e-9);
        prop_assert!(z_score(v, mean(&values).unwrap(), s).abs() < 1e-2);
    }

    #[test]
    fn std_is_shift_invariant(
        values in prop::collection::vec(-100.0f64..100.0, 2..32),
        shift in -1.0e3f64..1.0e3,
    ) {
        let shifted: Vec<f64> = values.iter().map(|v| v + shift).collect();
        let a = sample_std(&values).unwrap();
        let b = sample_std(&shifted).unwrap();
        prop_assert!((a - b).abs() < 1e-6);
    }
}
