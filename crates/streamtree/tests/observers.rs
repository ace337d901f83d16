//! Attribute observer tests on small reference datasets.
//!
//! Expected merits, thresholds and post-split statistics are hand-checked
//! values for the weather, golf, petal-length and area/price fixtures.

use approx::assert_abs_diff_eq;
use rstest::rstest;

use streamtree::data::{Instance, TargetValue, Value};
use streamtree::stats::{NumSeries, TargetStats};
use streamtree::testing::data::{AREA_PRICES, PETAL_LENGTHS, golf, weather};
use streamtree::testing::{LOOSE_TOLERANCE, assert_votes_eq};
use streamtree::training::observers::{
    GaussianClassObserver, NominalClassObserver, NominalRegressionObserver,
    NumericRegressionObserver,
};
use streamtree::training::{SplitCondition, SplitCriterion};
use streamtree::ClassDistribution;

// =============================================================================
// Helpers
// =============================================================================

fn weather_outlook() -> NominalClassObserver {
    let (model, instances) = weather();
    let outlook = model.predictor_index("outlook").unwrap();

    let mut observer = NominalClassObserver::new();
    let mut row = Vec::new();
    for inst in &instances {
        let TargetValue::Class(class) = model.decode_target(inst).unwrap() else {
            unreachable!("weather target is nominal")
        };
        model.decode_predictors(inst, &mut row).unwrap();
        observer.observe(class, row[outlook].as_nominal(), inst.weight());
    }
    observer
}

fn petal_lengths() -> GaussianClassObserver {
    let mut observer = GaussianClassObserver::new(4);
    for (len, class) in PETAL_LENGTHS {
        observer.observe(class, Some(len), 1.0);
    }
    observer
}

fn golf_outlook() -> (NominalRegressionObserver, NumSeries) {
    let (model, instances) = golf();
    let outlook = model.predictor_index("outlook").unwrap();

    let mut observer = NominalRegressionObserver::new();
    let mut pre = NumSeries::new();
    let mut row = Vec::new();
    for inst in &instances {
        let TargetValue::Numeric(hours) = model.decode_target(inst).unwrap() else {
            unreachable!("golf target is numeric")
        };
        model.decode_predictors(inst, &mut row).unwrap();
        observer.observe(hours, row[outlook].as_nominal(), inst.weight());
        pre.append(hours, inst.weight());
    }
    (observer, pre)
}

fn area_prices() -> (NumericRegressionObserver, NumSeries) {
    let mut observer = NumericRegressionObserver::new(5, 1000, 42);
    let mut pre = NumSeries::new();
    for (area, price) in AREA_PRICES {
        observer.observe(price, Some(area), 1.0);
        pre.append(price, 1.0);
    }
    (observer, pre)
}

fn classes(stats: &TargetStats) -> &ClassDistribution {
    stats.as_classes().expect("classification statistics")
}

// =============================================================================
// Nominal classification
// =============================================================================

#[rstest]
#[case::play_if_sunny(0, 2, 0.333)]
#[case::play_if_overcast(0, 1, 0.417)]
#[case::play_if_rainy(0, 0, 0.250)]
#[case::dont_play_if_sunny(1, 2, 0.375)]
#[case::dont_play_if_overcast(1, 1, 0.125)]
#[case::dont_play_if_rainy(1, 0, 0.500)]
fn nominal_class_probability(#[case] class: usize, #[case] value: usize, #[case] expected: f64) {
    let observer = weather_outlook();
    assert_abs_diff_eq!(
        observer.probability(class, Some(value)),
        expected,
        epsilon = LOOSE_TOLERANCE
    );
}

#[test]
fn nominal_class_probabilities_sum_to_one() {
    let observer = weather_outlook();
    for class in 0..2 {
        let total: f64 = (0..3).map(|v| observer.probability(class, Some(v))).sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn nominal_class_best_split() {
    let observer = weather_outlook();
    let criterion = SplitCriterion::InformationGain { min_branch_frac: 0.1 };
    let pre = TargetStats::Classes(ClassDistribution::from_votes(vec![9.0, 5.0]));

    let split = observer.best_split(&criterion, 0, &pre).unwrap();
    assert_abs_diff_eq!(split.merit, 0.247, epsilon = LOOSE_TOLERANCE);
    assert_eq!(split.range, 1.0);
    assert_eq!(
        split.condition,
        SplitCondition::NominalMultiway {
            predictor: 0,
            branches: 3
        }
    );

    assert_eq!(split.post_stats.len(), 3);
    assert_votes_eq(classes(&split.post_stats[0]).votes(), &[2.0, 3.0], 0.0);
    assert_votes_eq(classes(&split.post_stats[1]).votes(), &[4.0, 0.0], 0.0);
    assert_votes_eq(classes(&split.post_stats[2]).votes(), &[3.0, 2.0], 0.0);
}

// =============================================================================
// Gaussian classification
// =============================================================================

#[test]
fn gaussian_class_split_points() {
    let observer = petal_lengths();
    let points = observer.split_points();
    assert_eq!(points.len(), 4);
    for (p, e) in points.iter().zip([2.3, 3.3, 4.3, 5.3]) {
        assert_abs_diff_eq!(*p, e, epsilon = 1e-12);
    }
}

#[rstest]
#[case::b_at_4_5(1, 4.5, 0.472)]
#[case::a_at_4_5(0, 4.5, 0.0)]
#[case::a_at_1_7(0, 1.7, 0.044)]
fn gaussian_class_probability(#[case] class: usize, #[case] len: f64, #[case] expected: f64) {
    let observer = petal_lengths();
    assert_abs_diff_eq!(observer.probability(class, Some(len)), expected, epsilon = 0.01);
}

#[test]
fn gaussian_class_best_split() {
    let observer = petal_lengths();
    let criterion = SplitCriterion::InformationGain { min_branch_frac: 0.1 };
    let pre = TargetStats::Classes(ClassDistribution::from_votes(vec![3.0, 5.0, 4.0]));

    let split = observer.best_split(&criterion, 0, &pre).unwrap();
    assert_abs_diff_eq!(split.merit, 0.811, epsilon = LOOSE_TOLERANCE);
    assert_abs_diff_eq!(split.range, 1.585, epsilon = LOOSE_TOLERANCE);

    let SplitCondition::NumericBinary { predictor, threshold } = split.condition else {
        panic!("expected a numeric binary split, got {:?}", split.condition);
    };
    assert_eq!(predictor, 0);
    assert_abs_diff_eq!(threshold, 2.3, epsilon = 1e-12);

    assert_eq!(split.post_stats.len(), 2);
    assert_votes_eq(classes(&split.post_stats[0]).votes(), &[3.0], 1e-12);
    assert_votes_eq(classes(&split.post_stats[1]).votes(), &[0.0, 5.0, 4.0], 1e-12);
}

// =============================================================================
// Nominal regression
// =============================================================================

#[rstest]
#[case::rainy(0, 7.78)]
#[case::overcast(1, 3.49)]
#[case::sunny(2, 10.87)]
fn nominal_regression_value_spread(#[case] value: usize, #[case] std_dev: f64) {
    let (observer, _) = golf_outlook();
    let series = observer.series(value).unwrap();
    assert_abs_diff_eq!(series.std_dev(), std_dev, epsilon = 0.01);
}

#[test]
fn nominal_regression_best_split() {
    let (observer, pre) = golf_outlook();
    let criterion = SplitCriterion::VarianceReduction { min_branch_frac: 0.0 };

    let split = observer
        .best_split(&criterion, 0, &TargetStats::Numeric(pre))
        .unwrap();
    assert_abs_diff_eq!(split.merit, 19.572, epsilon = LOOSE_TOLERANCE);
    assert_eq!(split.range, 1.0);
    assert!(matches!(
        split.condition,
        SplitCondition::NominalMultiway { predictor: 0, branches: 3 }
    ));
}

// =============================================================================
// Numeric regression
// =============================================================================

#[test]
fn numeric_regression_observe() {
    let (observer, _) = area_prices();
    assert_eq!(observer.len(), 12);

    let points = observer.split_points();
    for (p, e) in points.iter().zip([1.1, 1.4, 1.7, 2.0, 2.3]) {
        assert_abs_diff_eq!(*p, e, epsilon = 1e-12);
    }
}

#[rstest]
#[case::unrestricted(0.0)]
#[case::min_branch_frac(0.1)]
fn numeric_regression_best_split(#[case] min_branch_frac: f64) {
    let (observer, pre) = area_prices();
    let criterion = SplitCriterion::VarianceReduction { min_branch_frac };

    let split = observer
        .best_split(&criterion, 0, &TargetStats::Numeric(pre))
        .unwrap();
    assert_abs_diff_eq!(split.merit, 1.911, epsilon = LOOSE_TOLERANCE);
    assert_eq!(split.range, 1.0);

    let SplitCondition::NumericBinary { threshold, .. } = split.condition else {
        panic!("expected a numeric binary split, got {:?}", split.condition);
    };
    assert_abs_diff_eq!(threshold, 1.7, epsilon = 1e-12);

    let left = split.post_stats[0].as_numeric().unwrap();
    let right = split.post_stats[1].as_numeric().unwrap();
    assert_eq!(left.total_weight(), 10.0);
    assert_eq!(right.total_weight(), 2.0);
}

#[test]
fn min_branch_frac_rejects_isolating_split() {
    // x = 0..=9 with y = x, plus one outlier at x = 10. Isolating the
    // outlier has the highest merit but leaves 1/11 of the weight on its side.
    let build = || {
        let mut observer = NumericRegressionObserver::new(9, 1000, 0);
        let mut pre = NumSeries::new();
        for x in 0..10 {
            observer.observe(x as f64, Some(x as f64), 1.0);
            pre.append(x as f64, 1.0);
        }
        observer.observe(1000.0, Some(10.0), 1.0);
        pre.append(1000.0, 1.0);
        (observer, TargetStats::Numeric(pre))
    };

    let threshold_of = |frac: f64| {
        let (observer, pre) = build();
        let criterion = SplitCriterion::VarianceReduction { min_branch_frac: frac };
        match observer.best_split(&criterion, 0, &pre).unwrap().condition {
            SplitCondition::NumericBinary { threshold, .. } => threshold,
            other => panic!("unexpected condition {other:?}"),
        }
    };

    assert_abs_diff_eq!(threshold_of(0.0), 9.0, epsilon = 1e-9);
    assert!(threshold_of(0.1) < 8.5);
}

// =============================================================================
// Enum dispatch
// =============================================================================

#[test]
fn observer_dispatch_matches_concrete_types() {
    use streamtree::data::AttributeKind;
    use streamtree::training::Observer;
    use streamtree::TreeConfig;

    let config = TreeConfig::builder().numeric_splits(4).build().unwrap();
    let mut observer =
        Observer::for_attribute(AttributeKind::Nominal, AttributeKind::Numeric, &config, 0);
    for (len, class) in PETAL_LENGTHS {
        observer.observe(TargetValue::Class(class), Value::Numeric(len), 1.0);
    }
    // Ignored: missing value and zero weight
    observer.observe(TargetValue::Class(0), Value::Missing, 1.0);
    observer.observe(TargetValue::Class(0), Value::Numeric(100.0), 0.0);

    let criterion = SplitCriterion::InformationGain { min_branch_frac: 0.1 };
    let pre = TargetStats::Classes(ClassDistribution::from_votes(vec![3.0, 5.0, 4.0]));
    let via_enum = observer.best_split(&criterion, 0, &pre).unwrap();
    let direct = petal_lengths().best_split(&criterion, 0, &pre).unwrap();
    assert_eq!(via_enum, direct);

    assert_abs_diff_eq!(
        observer.probability(TargetValue::Class(1), Value::Numeric(4.5)),
        petal_lengths().probability(1, Some(4.5)),
        epsilon = 0.0
    );
}
