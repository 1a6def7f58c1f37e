//! Outcome-stratified train/test partitioning.

use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::RngHandle;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Row positions of each partition, both in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// Training rows.
    pub train: Vec<usize>,
    /// Held-out rows.
    pub test: Vec<usize>,
}

fn class_counts(code: &str, message: &str, negatives: usize, positives: usize) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("negatives", negatives)
        .with_context("positives", positives)
}

/// Splits row positions so each outcome class contributes
/// `round(n_class * test_fraction)` rows to the test partition.
///
/// Members of each class are shuffled with `rng` before the cut. Fails with
/// [`EdoError::Partition`] when the input or the training partition holds a
/// single class, or when the test partition would be empty.
pub fn stratified_split(labels: &[bool], test_fraction: f64, rng: &mut RngHandle) -> Result<Split, EdoError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(EdoError::Config(
            ErrorInfo::new("invalid-test-fraction", "test fraction must lie strictly between 0 and 1")
                .with_context("value", test_fraction),
        ));
    }
    let mut negatives: Vec<usize> = Vec::new();
    let mut positives: Vec<usize> = Vec::new();
    for (idx, &label) in labels.iter().enumerate() {
        if label {
            positives.push(idx);
        } else {
            negatives.push(idx);
        }
    }
    if negatives.is_empty() || positives.is_empty() {
        return Err(EdoError::Partition(
            class_counts(
                "single-class",
                "outcome has a single class",
                negatives.len(),
                positives.len(),
            )
            .with_hint("the input needs both outcome values"),
        ));
    }

    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();
    let mut train_classes = [0usize; 2];
    for (class, members) in [negatives, positives].iter_mut().enumerate() {
        let n_test = (members.len() as f64 * test_fraction).round() as usize;
        members.shuffle(rng);
        test.extend_from_slice(&members[..n_test]);
        train.extend_from_slice(&members[n_test..]);
        train_classes[class] = members.len() - n_test;
    }
    if train_classes.contains(&0) {
        return Err(EdoError::Partition(class_counts(
            "single-class-train",
            "training partition holds a single outcome class",
            train_classes[0],
            train_classes[1],
        )));
    }
    if test.is_empty() {
        return Err(EdoError::Partition(
            ErrorInfo::new("empty-test", "test partition is empty")
                .with_context("rows", labels.len())
                .with_context("test_fraction", test_fraction),
        ));
    }
    train.sort_unstable();
    test.sort_unstable();
    Ok(Split { train, test })
}
