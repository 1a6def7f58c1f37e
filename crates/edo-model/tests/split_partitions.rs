use std::collections::BTreeSet;

use edo_core::{EdoError, RngHandle};
use edo_model::stratified_split;
use proptest::prelude::*;

fn labels(negatives: usize, positives: usize) -> Vec<bool> {
    // interleave so class members are not contiguous
    let mut labels = vec![false; negatives];
    for i in 0..positives {
        let at = (i * 7) % (labels.len() + 1);
        labels.insert(at, true);
    }
    labels
}

proptest! {
    #[test]
    fn partitions_are_disjoint_complete_and_balanced(
        negatives in 10usize..200,
        positives in 10usize..200,
        fraction in 0.1f64..0.5,
        seed in any::<u64>(),
    ) {
        let labels = labels(negatives, positives);
        let mut rng = RngHandle::from_seed(seed);
        let split = stratified_split(&labels, fraction, &mut rng).expect("split");

        let train: BTreeSet<usize> = split.train.iter().copied().collect();
        let test: BTreeSet<usize> = split.test.iter().copied().collect();
        prop_assert!(train.is_disjoint(&test));
        prop_assert_eq!(train.len() + test.len(), labels.len());
        prop_assert_eq!(train.union(&test).count(), labels.len());

        for class in [false, true] {
            let total = labels.iter().filter(|&&l| l == class).count() as f64;
            let held = split.test.iter().filter(|&&i| labels[i] == class).count() as f64;
            prop_assert!((held - total * fraction).abs() <= 0.5);
        }
        prop_assert!(split.train.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(split.test.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn same_seed_same_split() {
    let labels = labels(120, 80);
    let a = stratified_split(&labels, 0.2, &mut RngHandle::from_seed(9)).expect("split");
    let b = stratified_split(&labels, 0.2, &mut RngHandle::from_seed(9)).expect("split");
    let c = stratified_split(&labels, 0.2, &mut RngHandle::from_seed(10)).expect("split");
    assert_eq!(a, b);
    assert_ne!(a.test, c.test);
    assert_eq!(a.test.len(), 24 + 16);
}

#[test]
fn single_class_input_is_a_partition_error() {
    let err = stratified_split(&[true; 50], 0.2, &mut RngHandle::from_seed(1)).expect_err("single class");
    let EdoError::Partition(info) = err else {
        panic!("expected partition error");
    };
    assert_eq!(info.code, "single-class");
    assert_eq!(info.context["positives"], "50");
}

#[test]
fn single_class_training_partition_is_detected() {
    // the lone positive is rounded into the test partition
    let mut labels = vec![false; 20];
    labels.push(true);
    let err = stratified_split(&labels, 0.5, &mut RngHandle::from_seed(1)).expect_err("degenerate");
    assert!(matches!(err, EdoError::Partition(ref info) if info.code == "single-class-train"));
}

#[test]
fn fraction_outside_unit_interval_is_rejected() {
    let labels = labels(10, 10);
    for fraction in [0.0, 1.0, -0.2, f64::NAN] {
        let err = stratified_split(&labels, fraction, &mut RngHandle::from_seed(1)).expect_err("fraction");
        assert!(matches!(err, EdoError::Config(_)));
    }
}
