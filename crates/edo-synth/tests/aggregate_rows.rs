use edo_core::{Feature, Region};
use edo_synth::{generate_population, summarize, GenerativeParams};

#[test]
fn one_summary_per_populated_stratum() {
    let population =
        generate_population(&[Region::Abia, Region::Gombe], &GenerativeParams::default(), 20, 8)
            .expect("population");
    let summaries = summarize(&population.individuals);
    assert_eq!(summaries.len(), 8);
    for summary in &summaries {
        assert_eq!(summary.count, 20);
        assert!((0.0..=100.0).contains(&summary.outcome_rate));
    }
    let mut keys: Vec<_> = summaries.iter().map(|s| s.key).collect();
    let sorted = {
        let mut k = keys.clone();
        k.sort();
        k
    };
    assert_eq!(keys, sorted);
    keys.dedup();
    assert_eq!(keys.len(), 8);
}

#[test]
fn means_and_rates_match_manual_computation() {
    let population =
        generate_population(&[Region::Benue], &GenerativeParams::default(), 10, 21).expect("population");
    let first_block = &population.individuals[..10];
    let summaries = summarize(first_block);
    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    let expected_rate =
        first_block.iter().filter(|row| row.outcome).count() as f64 / 10.0 * 100.0;
    assert!((summary.outcome_rate - expected_rate).abs() < 1e-12);
    let expected_size: f64 =
        first_block.iter().map(|row| row.features[Feature::HouseholdSize]).sum::<f64>() / 10.0;
    assert!((summary.means[Feature::HouseholdSize] - expected_size).abs() < 1e-12);
}

#[test]
fn empty_input_yields_no_rows() {
    let rows: Vec<edo_synth::Individual> = Vec::new();
    assert!(summarize(&rows).is_empty());
}
