//! Classification metrics on binary labels.

use serde::{Deserialize, Serialize};

/// Fraction of matching predictions; zero for empty input.
pub fn accuracy(labels: &[bool], predictions: &[bool]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let hits = labels
        .iter()
        .zip(predictions)
        .filter(|(label, prediction)| label == prediction)
        .count();
    hits as f64 / labels.len() as f64
}

/// Area under the ROC curve from the Mann-Whitney rank statistic.
///
/// Tied scores share their average rank. Returns `None` unless both classes
/// are present.
pub fn roc_auc(labels: &[bool], scores: &[f64]) -> Option<f64> {
    let positives = labels.iter().filter(|&&l| l).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 {
        return None;
    }
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut positive_rank_sum = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        // ranks are 1-based; the tie block covers ranks start+1..=end
        let average_rank = (start + 1 + end) as f64 / 2.0;
        let tied_positives = order[start..end].iter().filter(|&&idx| labels[idx]).count();
        positive_rank_sum += average_rank * tied_positives as f64;
        start = end;
    }
    let p = positives as f64;
    Some((positive_rank_sum - p * (p + 1.0) / 2.0) / (p * negatives as f64))
}

/// Counts laid out as `[[TN, FP], [FN, TP]]`.
pub fn confusion_matrix(labels: &[bool], predictions: &[bool]) -> [[usize; 2]; 2] {
    let mut matrix = [[0usize; 2]; 2];
    for (&label, &prediction) in labels.iter().zip(predictions) {
        matrix[usize::from(label)][usize::from(prediction)] += 1;
    }
    matrix
}

/// Precision, recall and F1 for one class or one average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// Share of predicted members that are members.
    pub precision: f64,
    /// Share of members that were predicted.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    #[serde(rename = "f1-score")]
    pub f1: f64,
    /// Number of true members.
    pub support: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl ClassMetrics {
    fn from_counts(true_positive: usize, predicted: usize, support: usize) -> Self {
        let precision = ratio(true_positive, predicted);
        let recall = ratio(true_positive, support);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1,
            support,
        }
    }
}

/// Per-class table with overall accuracy and macro/weighted averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Negative class.
    #[serde(rename = "0")]
    pub negative: ClassMetrics,
    /// Positive class.
    #[serde(rename = "1")]
    pub positive: ClassMetrics,
    /// Overall accuracy.
    pub accuracy: f64,
    /// Unweighted mean over classes.
    #[serde(rename = "macro avg")]
    pub macro_avg: ClassMetrics,
    /// Support-weighted mean over classes.
    #[serde(rename = "weighted avg")]
    pub weighted_avg: ClassMetrics,
}

impl ClassificationReport {
    /// Derives the report from a confusion matrix.
    pub fn from_confusion(matrix: &[[usize; 2]; 2]) -> Self {
        let [[tn, fp], [fn_, tp]] = *matrix;
        let negative = ClassMetrics::from_counts(tn, tn + fn_, tn + fp);
        let positive = ClassMetrics::from_counts(tp, tp + fp, fn_ + tp);
        let total = tn + fp + fn_ + tp;
        let average = |weight_neg: f64, weight_pos: f64| ClassMetrics {
            precision: weight_neg * negative.precision + weight_pos * positive.precision,
            recall: weight_neg * negative.recall + weight_pos * positive.recall,
            f1: weight_neg * negative.f1 + weight_pos * positive.f1,
            support: total,
        };
        Self {
            negative,
            positive,
            accuracy: ratio(tn + tp, total),
            macro_avg: average(0.5, 0.5),
            weighted_avg: average(ratio(negative.support, total), ratio(positive.support, total)),
        }
    }
}

/// Headline scores of one modeling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Classifier accuracy on the training partition.
    pub train_accuracy: f64,
    /// Classifier accuracy on the test partition.
    pub test_accuracy: f64,
    /// Test ROC AUC; absent when the test partition holds one class.
    pub test_roc_auc: Option<f64>,
}
