use edo_model::{accuracy, confusion_matrix, roc_auc, ClassificationReport};

#[test]
fn auc_of_perfect_and_reversed_rankings() {
    let labels = [false, false, true, true];
    assert_eq!(roc_auc(&labels, &[0.1, 0.2, 0.8, 0.9]), Some(1.0));
    assert_eq!(roc_auc(&labels, &[0.9, 0.8, 0.2, 0.1]), Some(0.0));
}

#[test]
fn auc_averages_tied_ranks() {
    let labels = [false, true, false, true];
    assert_eq!(roc_auc(&labels, &[0.5, 0.5, 0.5, 0.5]), Some(0.5));
    // one of four positive/negative pairs is tied, the rest are ordered correctly
    let auc = roc_auc(&[false, false, true, true], &[0.1, 0.6, 0.6, 0.9]).expect("auc");
    assert!((auc - 0.875).abs() < 1e-12);
}

#[test]
fn auc_needs_both_classes() {
    assert_eq!(roc_auc(&[true, true], &[0.3, 0.4]), None);
    assert_eq!(roc_auc(&[], &[]), None);
}

#[test]
fn confusion_layout_is_tn_fp_fn_tp() {
    let labels = [false, false, false, true, true];
    let predictions = [false, true, true, false, true];
    assert_eq!(confusion_matrix(&labels, &predictions), [[1, 2], [1, 1]]);
    assert!((accuracy(&labels, &predictions) - 0.4).abs() < 1e-12);
}

#[test]
fn classification_report_matches_hand_computation() {
    let report = ClassificationReport::from_confusion(&[[50, 10], [5, 35]]);
    assert!((report.positive.precision - 35.0 / 45.0).abs() < 1e-12);
    assert!((report.positive.recall - 35.0 / 40.0).abs() < 1e-12);
    assert!((report.negative.precision - 50.0 / 55.0).abs() < 1e-12);
    assert_eq!(report.negative.support, 60);
    assert_eq!(report.weighted_avg.support, 100);
    assert!((report.accuracy - 0.85).abs() < 1e-12);
    let macro_recall = (50.0 / 60.0 + 35.0 / 40.0) / 2.0;
    assert!((report.macro_avg.recall - macro_recall).abs() < 1e-12);
    let weighted_recall = 0.6 * (50.0 / 60.0) + 0.4 * (35.0 / 40.0);
    assert!((report.weighted_avg.recall - weighted_recall).abs() < 1e-12);
}

#[test]
fn zero_denominators_score_zero() {
    // nothing predicted positive
    let report = ClassificationReport::from_confusion(&[[8, 0], [2, 0]]);
    assert_eq!(report.positive.precision, 0.0);
    assert_eq!(report.positive.f1, 0.0);
    let value = serde_json::to_value(&report).expect("json");
    assert_eq!(value["1"]["support"], 2);
    assert!(value["macro avg"]["f1-score"].is_number());
}
