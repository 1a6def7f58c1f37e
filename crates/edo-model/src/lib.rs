#![deny(missing_docs)]
#![doc = "Modeling pipeline: outcome-stratified split, training-only standardisation, a ridge-penalised logistic fit for odds-ratio inference (plain maximum likelihood with `ridge: 0`) and a separately optimised classifier for predictive metrics."]

pub mod classifier;
pub mod findings;
pub mod logit;
pub mod metrics;
pub mod opts;
pub mod report;
pub mod scale;
pub mod split;

use edo_core::errors::EdoError;
use edo_core::rng::SPLIT_STREAM;
use edo_core::{Feature, FeatureVector, RngHandle, StratumRecord};
use serde::{Deserialize, Serialize};

pub use classifier::LogisticClassifier;
pub use findings::{interpret_odds_ratio, key_findings, Finding};
pub use logit::{coefficient_table, fit_inference, significance, CoefficientRow, InferenceFit, INTERCEPT};
pub use metrics::{accuracy, confusion_matrix, roc_auc, ClassMetrics, ClassificationReport, Metrics};
pub use opts::ModelOpts;
pub use report::{write_coefficient_table, Convergence, ModelingReport, MODEL_TYPE};
pub use scale::StandardScaler;
pub use split::{stratified_split, Split};

/// Everything one modeling run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelingOutcome {
    /// Odds-ratio table, intercept first.
    pub coefficients: Vec<CoefficientRow>,
    /// Metrics summary.
    pub report: ModelingReport,
    /// Row positions of each partition.
    pub split: Split,
    /// Scaler fitted on the training partition.
    pub scaler: StandardScaler,
}

fn select(rows: &[FeatureVector], labels: &[bool], positions: &[usize]) -> (Vec<FeatureVector>, Vec<bool>) {
    positions.iter().map(|&idx| (rows[idx], labels[idx])).unzip()
}

/// Runs split, scaling, both fits and evaluation on `records`.
///
/// The split draws from substream [`SPLIT_STREAM`] of `seed`. Region effects
/// and stratum labels are not model inputs; only the catalog features are.
pub fn fit_pipeline<R: StratumRecord>(records: &[R], opts: &ModelOpts, seed: u64) -> Result<ModelingOutcome, EdoError> {
    opts.validate()?;
    let rows: Vec<FeatureVector> = records.iter().map(|r| *r.features()).collect();
    let labels: Vec<bool> = records.iter().map(StratumRecord::outcome).collect();

    let mut rng = RngHandle::substream(seed, SPLIT_STREAM);
    let split = stratified_split(&labels, opts.test_fraction, &mut rng)?;
    let (train_raw, train_labels) = select(&rows, &labels, &split.train);
    let (test_raw, test_labels) = select(&rows, &labels, &split.test);
    tracing::info!(train = split.train.len(), test = split.test.len(), "split records");

    let scaler = StandardScaler::fit(&train_raw);
    let train = scaler.transform(&train_raw);
    let test = scaler.transform(&test_raw);

    let inference = fit_inference(&train, &train_labels, opts)?;
    let coefficients = coefficient_table(&inference, opts.confidence)?;

    let classifier = LogisticClassifier::fit(&train, &train_labels, opts)?;
    let train_predictions: Vec<bool> = train.iter().map(|row| classifier.predict(row)).collect();
    let test_scores: Vec<f64> = test.iter().map(|row| classifier.predict_proba(row)).collect();
    let test_predictions: Vec<bool> = test_scores.iter().map(|&p| p > 0.5).collect();

    let confusion = confusion_matrix(&test_labels, &test_predictions);
    let metrics = Metrics {
        train_accuracy: accuracy(&train_labels, &train_predictions),
        test_accuracy: accuracy(&test_labels, &test_predictions),
        test_roc_auc: roc_auc(&test_labels, &test_scores),
    };
    tracing::info!(
        train_accuracy = metrics.train_accuracy,
        test_accuracy = metrics.test_accuracy,
        test_roc_auc = metrics.test_roc_auc.unwrap_or(f64::NAN),
        "evaluated classifier"
    );

    let report = ModelingReport {
        model_type: MODEL_TYPE.to_string(),
        features: Feature::ALL.iter().map(|f| f.name().to_string()).collect(),
        train_size: split.train.len(),
        test_size: split.test.len(),
        metrics,
        confusion_matrix: confusion,
        classification_report: ClassificationReport::from_confusion(&confusion),
        key_findings: key_findings(&coefficients, &opts.outcome_label),
        convergence: Convergence {
            inference_iterations: inference.iterations,
            inference_converged: inference.converged,
            classifier_iterations: classifier.iterations,
            classifier_converged: classifier.converged,
        },
    };
    Ok(ModelingOutcome {
        coefficients,
        report,
        split,
        scaler,
    })
}
