//! Property-based tests for table lookup and the steering clamp.

use active_steering::{evaluate, Curve, EvaluationDirection, SteeringPolicyInit};
use proptest::prelude::*;

/// Strictly increasing breakpoints with arbitrary values.
fn ascending_table() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (2usize..8)
        .prop_flat_map(|len| {
            (
                -100.0f64..100.0,
                prop::collection::vec(0.5f64..50.0, len - 1),
                prop::collection::vec(-60.0f64..60.0, len),
            )
        })
        .prop_map(|(start, gaps, values)| {
            let breakpoints: Vec<f64> = std::iter::once(start)
                .chain(gaps.iter().scan(start, |x, gap| {
                    *x += gap;
                    Some(*x)
                }))
                .collect();
            (breakpoints, values)
        })
}

/// Like `ascending_table`, sometimes squeezed or stretched until segments
/// overflow.
fn scaled_table() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (
        ascending_table(),
        prop_oneof![Just(1.0), Just(1e-300), Just(1e-310)],
        prop_oneof![Just(1.0), Just(1e306)],
    )
        .prop_map(|((breakpoints, values), x_scale, y_scale)| {
            (
                breakpoints.iter().map(|x| x * x_scale).collect(),
                values.iter().map(|y| y * y_scale).collect(),
            )
        })
}

fn reversed((mut breakpoints, mut values): (Vec<f64>, Vec<f64>)) -> (Vec<f64>, Vec<f64>) {
    breakpoints.reverse();
    values.reverse();
    (breakpoints, values)
}

fn close(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() <= 1e-9 * lhs.abs().max(rhs.abs()).max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn single_point_is_constant(point in -1e3f64..1e3, value in -1e3f64..1e3, x in -1e6f64..1e6) {
        let curve = Curve::new(&[point], &[value]).unwrap();
        prop_assert_eq!(evaluate(&curve, x, EvaluationDirection::Ascending), value);
        prop_assert_eq!(evaluate(&curve, x, EvaluationDirection::Descending), value);
    }

    #[test]
    fn ascending_interpolates_between_breakpoints(
        (breakpoints, values) in ascending_table(),
        segment in any::<prop::sample::Index>(),
        t in 0.0f64..=1.0,
    ) {
        let curve = Curve::new(&breakpoints, &values).unwrap();
        let i = segment.index(breakpoints.len() - 1);
        let (x0, x1, y0, y1) = (breakpoints[i], breakpoints[i + 1], values[i], values[i + 1]);
        let x = x0 + t * (x1 - x0);

        let expected = y0 + (x - x0) * (y1 - y0) / (x1 - x0);
        let actual = evaluate(&curve, x, EvaluationDirection::Ascending);
        prop_assert!(close(actual, expected), "f({}) = {}, expected {}", x, actual, expected);
    }

    #[test]
    fn ascending_extrapolates_flat(
        (breakpoints, values) in ascending_table(),
        overshoot in 0.0f64..1e6,
    ) {
        let curve = Curve::new(&breakpoints, &values).unwrap();
        let first = breakpoints[0];
        let last = breakpoints[breakpoints.len() - 1];

        prop_assert_eq!(evaluate(&curve, first, EvaluationDirection::Ascending), values[0]);
        prop_assert_eq!(evaluate(&curve, first - overshoot, EvaluationDirection::Ascending), values[0]);
        prop_assert_eq!(
            evaluate(&curve, last + 1.0 + overshoot, EvaluationDirection::Ascending),
            values[values.len() - 1]
        );
    }

    #[test]
    fn descending_mirrors_ascending(
        table in ascending_table(),
        segment in any::<prop::sample::Index>(),
        t in 0.0f64..=1.0,
        overshoot in 0.0f64..1e6,
    ) {
        let (breakpoints, values) = reversed(table);
        let curve = Curve::new(&breakpoints, &values).unwrap();
        let first = breakpoints[0];
        let last = breakpoints[breakpoints.len() - 1];

        prop_assert_eq!(evaluate(&curve, first + overshoot, EvaluationDirection::Descending), values[0]);
        prop_assert_eq!(
            evaluate(&curve, last - 1.0 - overshoot, EvaluationDirection::Descending),
            values[values.len() - 1]
        );

        let i = segment.index(breakpoints.len() - 1);
        let (x0, x1, y0, y1) = (breakpoints[i], breakpoints[i + 1], values[i], values[i + 1]);
        let x = x0 + t * (x1 - x0);
        let expected = y0 + (x - x0) * (y1 - y0) / (x1 - x0);
        let actual = evaluate(&curve, x, EvaluationDirection::Descending);
        prop_assert!(close(actual, expected), "f({}) = {}, expected {}", x, actual, expected);
    }

    #[test]
    fn angles_always_within_clamp(
        (front_speeds, front_angles) in scaled_table(),
        (rear_speeds, rear_angles) in scaled_table(),
        (adjustment_frictions, front_adjustments) in scaled_table().prop_map(reversed),
        speed in prop::num::f64::ANY,
        friction in prop::num::f64::ANY,
    ) {
        let rear_adjustments = front_adjustments.iter().map(|value| -value).collect();
        let init = SteeringPolicyInit {
            front_speeds,
            front_angles,
            rear_speeds,
            rear_angles,
            adjustment_frictions,
            front_adjustments,
            rear_adjustments,
            ..SteeringPolicyInit::default()
        };
        // Ill-conditioned tables are rejected at build time; the rest must clamp.
        let Ok(policy) = init.build() else {
            return Ok(());
        };
        let angles = policy.compute_angles(speed, Some(friction));

        prop_assert!((0.0..=46.0).contains(&angles.front), "front {}", angles.front);
        prop_assert!((0.0..=46.0).contains(&angles.rear), "rear {}", angles.rear);
    }

    #[test]
    fn friction_is_irrelevant_without_adjustment(
        speed in -1e4f64..1e4,
        friction in prop::num::f64::ANY,
    ) {
        let policy = SteeringPolicyInit::default().build().unwrap();
        prop_assert_eq!(
            policy.compute_angles(speed, Some(friction)),
            policy.compute_angles(speed, None)
        );
    }
}
