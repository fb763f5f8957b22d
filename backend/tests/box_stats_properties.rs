//! Property tests for the box-plot statistics.

use housing_viz::services::{summarize, Classification};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e7_f64..1.0e7_f64, 1..200)
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn quartiles_are_ordered(values in values()) {
        let stats = summarize(&values).expect("non-empty input");
        prop_assert!(stats.q1 <= stats.median);
        prop_assert!(stats.median <= stats.q3);
        prop_assert!(stats.iqr >= 0.0);
        prop_assert_eq!(stats.count, values.len());
    }

    #[test]
    fn whiskers_bracket_the_box(values in values()) {
        let stats = summarize(&values).expect("non-empty input");
        prop_assert!(stats.whisker_min <= stats.q1);
        prop_assert!(stats.whisker_max >= stats.q3);
        prop_assert!(stats.lower_fence <= stats.whisker_min);
        prop_assert!(stats.whisker_max <= stats.upper_fence);
    }

    #[test]
    fn outliers_are_exactly_the_values_outside_the_fences(values in values()) {
        let stats = summarize(&values).expect("non-empty input");
        let fences = stats.fences();

        let mut expected: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| fences.classify(*v) == Classification::Outlier)
            .collect();
        expected.sort_by(f64::total_cmp);
        prop_assert_eq!(&stats.outliers, &expected);

        for v in values.iter().filter(|v| !stats.is_outlier(**v)) {
            prop_assert!(*v >= stats.whisker_min && *v <= stats.whisker_max);
        }
    }

    #[test]
    fn order_does_not_matter(values in values()) {
        let mut reversed = values.clone();
        reversed.reverse();
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);

        let stats = summarize(&values);
        prop_assert_eq!(&stats, &summarize(&reversed));
        prop_assert_eq!(&stats, &summarize(&sorted));
        prop_assert_eq!(&stats, &summarize(&values));
    }

    #[test]
    fn constant_input_has_zero_spread(value in 1.0_f64..1.0e6, n in 1_usize..50) {
        let stats = summarize(&vec![value; n]).expect("non-empty input");
        prop_assert_eq!(stats.iqr, 0.0);
        prop_assert_eq!(stats.q1, value);
        prop_assert_eq!(stats.q3, value);
        prop_assert!(stats.outliers.is_empty());
    }
}

#[test]
fn reference_example() {
    let stats = summarize(&[10.0, 20.0, 30.0, 40.0, 1000.0]).unwrap();
    assert_eq!(stats.q1, 20.0);
    assert_eq!(stats.median, 30.0);
    assert_eq!(stats.q3, 40.0);
    assert_eq!(stats.iqr, 20.0);
    assert_eq!(stats.lower_fence, -10.0);
    assert_eq!(stats.upper_fence, 70.0);
    assert_eq!(stats.whisker_min, 10.0);
    assert_eq!(stats.whisker_max, 40.0);
    assert_eq!(stats.outliers, vec![1000.0]);
}
