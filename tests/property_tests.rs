// tests/property_tests.rs
//! Property based tests over designs, coefficients and streaming

use iir_core::processing::{
    analog_poles, poly_coeffs_from_roots, to_analog, to_digital, Butterworth, ButterworthDesign, DigitalFilter,
    FilterKind,
};
use more_asserts::assert_le;
use num::Complex;
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = FilterKind> {
    prop_oneof![Just(FilterKind::LowPass), Just(FilterKind::HighPass)]
}

fn signal_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0..100.0f64, 1..64)
}

proptest! {
    #[test]
    fn bilinear_round_trip(
        fs in 10.0..10_000.0f64,
        re in -0.45..0.45f64,
        im in -0.45..0.45f64,
    ) {
        let s = Complex::new(re, im) * (2.0 * fs);
        let back = to_analog(fs, to_digital(fs, s));
        prop_assert!((back - s).norm() <= 1e-9 * s.norm().max(1.0));
    }

    #[test]
    fn stable_poles_map_inside_unit_circle(
        order in 1usize..10,
        ratio in 0.01..0.45f64,
        kind in kind_strategy(),
    ) {
        let design = match kind {
            FilterKind::HighPass => ButterworthDesign::highpass(order, ratio * 1000.0, 1000.0),
            _ => ButterworthDesign::lowpass(order, ratio * 1000.0, 1000.0),
        };
        for pole in analog_poles(&design) {
            prop_assert!(pole.re < 0.0);
            assert_le!(to_digital(1000.0, pole).norm(), 1.0);
        }
    }

    #[test]
    fn leading_coefficient_is_normalized(
        a0 in prop_oneof![-50.0..-1e-3f64, 1e-3..50.0f64],
        rest in prop::collection::vec(-10.0..10.0f64, 0..6),
        b in prop::collection::vec(-10.0..10.0f64, 1..6),
    ) {
        let mut a = vec![a0];
        a.extend(rest);
        let filter = DigitalFilter::with_coefficients(&a, &b).unwrap();
        prop_assert_eq!(filter.a_coefficients()[0], 1.0);
        for (normalized, original) in filter.b_coefficients().iter().zip(&b) {
            prop_assert!((normalized * a0 - original).abs() <= 1e-12 * original.abs().max(1.0));
        }
    }

    #[test]
    fn reset_matches_fresh_instance(
        order in 1usize..7,
        ratio in 0.02..0.45f64,
        kind in kind_strategy(),
        warmup in signal_strategy(),
        input in signal_strategy(),
    ) {
        let mut used = Butterworth::new(order, ratio * 500.0, 500.0, kind).unwrap();
        let mut fresh = used.clone();

        used.filter(&warmup).unwrap();
        used.reset_filter();
        prop_assert_eq!(used.filter(&input).unwrap(), fresh.filter(&input).unwrap());
    }

    #[test]
    fn batch_matches_stepping(
        order in 1usize..7,
        ratio in 0.02..0.45f64,
        kind in kind_strategy(),
        input in signal_strategy(),
    ) {
        let mut batch = Butterworth::new(order, ratio * 500.0, 500.0, kind).unwrap();
        let mut stepped = batch.clone();

        let expected: Vec<f64> = input.iter().map(|&x| stepped.step_filter(x).unwrap()).collect();
        prop_assert_eq!(batch.filter(&input).unwrap(), expected);
    }

    #[test]
    fn lowpass_has_unit_dc_gain(order in 1usize..7, ratio in 0.02..0.45f64) {
        let filter = Butterworth::new(order, ratio * 500.0, 500.0, FilterKind::LowPass).unwrap();
        let (a, b) = filter.coefficients();
        let gain = b.iter().sum::<f64>() / a.iter().sum::<f64>();
        prop_assert!((gain - 1.0).abs() < 1e-8);
    }

    #[test]
    fn polynomial_vanishes_at_roots(roots in prop::collection::vec(-5i64..=5, 0..7)) {
        let coeffs = poly_coeffs_from_roots(&roots);
        prop_assert_eq!(coeffs.len(), roots.len() + 1);
        prop_assert_eq!(coeffs[0], 1);
        for &root in &roots {
            let value = coeffs.iter().fold(0i64, |acc, &c| acc * root + c);
            prop_assert_eq!(value, 0);
        }
    }
}
