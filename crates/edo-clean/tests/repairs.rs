use edo_clean::{clean, RawTable};
use edo_core::{EdoError, Feature};

fn header() -> Vec<String> {
    let mut header = vec!["region".to_string(), "sex".to_string(), "location".to_string()];
    header.extend(Feature::ALL.iter().map(|f| f.name().to_string()));
    header.push("literacy_outcome".to_string());
    header
}

fn row(poverty: &str, outcome: &str) -> Vec<String> {
    let mut row = vec!["Lagos".to_string(), "F".to_string(), "urban".to_string()];
    for feature in Feature::ALL {
        let value = match feature {
            Feature::HouseholdPovertyRate => poverty.to_string(),
            Feature::TextbookAvailabilityIndex => "0.5".to_string(),
            Feature::MotherEducationYears => "9".to_string(),
            _ => "42".to_string(),
        };
        row.push(value);
    }
    row.push(outcome.to_string());
    row
}

fn with_feature(mut row: Vec<String>, feature: Feature, value: &str) -> Vec<String> {
    row[3 + feature.index()] = value.to_string();
    row
}

#[test]
fn poverty_above_range_is_clipped_not_dropped() {
    let raw = RawTable::from_rows(header(), vec![row("150", "1"), row("30", "0")]);
    let table = clean(&raw).expect("clean");
    assert_eq!(table.records.len(), 2);
    assert_eq!(table.records[0].features[Feature::HouseholdPovertyRate], 100.0);
    assert_eq!(table.report.clipped[&Feature::HouseholdPovertyRate], 1);
    assert_eq!(table.report.total_clipped(), 1);
}

#[test]
fn clipping_follows_each_rule() {
    let rows = vec![
        with_feature(row("30", "1"), Feature::TextbookAvailabilityIndex, "1.4"),
        with_feature(row("31", "0"), Feature::TravelTimeToSchoolMin, "-5"),
        with_feature(row("32", "1"), Feature::PupilTeacherRatio, "250"),
    ];
    let table = clean(&RawTable::from_rows(header(), rows)).expect("clean");
    assert_eq!(table.records[0].features[Feature::TextbookAvailabilityIndex], 1.0);
    assert_eq!(table.records[1].features[Feature::TravelTimeToSchoolMin], 0.0);
    // non-negative features have no upper bound
    assert_eq!(table.records[2].features[Feature::PupilTeacherRatio], 250.0);
    assert_eq!(table.report.total_clipped(), 2);
}

#[test]
fn duplicates_keep_first_occurrence() {
    let rows = vec![row("30", "1"), row("40", "0"), row("30", "1"), row("30", "1")];
    let table = clean(&RawTable::from_rows(header(), rows)).expect("clean");
    assert_eq!(table.report.duplicates_removed, 2);
    assert_eq!(table.records.len(), 2);
    assert_eq!(table.records[0].features[Feature::HouseholdPovertyRate], 30.0);
    assert_eq!(table.records[1].features[Feature::HouseholdPovertyRate], 40.0);
}

#[test]
fn missing_values_are_dropped_not_imputed() {
    let mut blank_region = row("30", "1");
    blank_region[0] = String::new();
    let rows = vec![
        row("30", "1"),
        with_feature(row("31", "0"), Feature::HouseholdSize, ""),
        with_feature(row("32", "0"), Feature::InternetAccessRate, "NaN"),
        blank_region,
        row("33", ""),
    ];
    let table = clean(&RawTable::from_rows(header(), rows)).expect("clean");
    assert_eq!(table.report.missing_removed, 4);
    assert_eq!(table.report.output_rows, 1);
}

#[test]
fn non_binary_outcomes_are_dropped_and_counted() {
    let rows = vec![row("30", "1"), row("31", "2"), row("32", "0.5"), row("33", "0.0")];
    let table = clean(&RawTable::from_rows(header(), rows)).expect("clean");
    assert_eq!(table.report.invalid_outcome_removed, 2);
    assert_eq!(table.records.len(), 2);
    assert!(table.records[0].outcome);
    assert!(!table.records[1].outcome);
}

#[test]
fn report_adds_up() {
    let rows = vec![
        row("30", "1"),
        row("30", "1"),
        row("31", "7"),
        with_feature(row("32", "0"), Feature::HouseholdSize, ""),
        row("150", "0"),
    ];
    let report = clean(&RawTable::from_rows(header(), rows)).expect("clean").report;
    assert_eq!(report.input_rows, 5);
    assert_eq!(
        report.input_rows,
        report.duplicates_removed
            + report.missing_removed
            + report.invalid_outcome_removed
            + report.output_rows
    );
    assert_eq!(report.output_rows, 2);
}

#[test]
fn unparseable_number_is_a_schema_error() {
    let rows = vec![with_feature(row("30", "1"), Feature::EnrollmentRate, "high")];
    let err = clean(&RawTable::from_rows(header(), rows)).expect_err("schema");
    match err {
        EdoError::Schema(info) => {
            assert_eq!(info.code, "non-numeric");
            assert_eq!(info.context["row"], "1");
            assert_eq!(info.context["column"], "enrollment_rate");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn unknown_region_is_a_schema_error() {
    let mut bad = row("30", "1");
    bad[0] = "Atlantis".to_string();
    let err = clean(&RawTable::from_rows(header(), vec![row("30", "1"), bad])).expect_err("schema");
    let EdoError::Schema(info) = err else {
        panic!("expected schema error");
    };
    assert_eq!(info.code, "unknown-category");
    assert_eq!(info.context["row"], "2");
    assert_eq!(info.context["value"], "Atlantis");
}

#[test]
fn missing_column_is_a_schema_error() {
    let mut header = header();
    header.retain(|name| name != "literacy_outcome");
    let rows = vec![{
        let mut r = row("30", "1");
        r.pop();
        r
    }];
    let err = clean(&RawTable::from_rows(header, rows)).expect_err("schema");
    assert_eq!(err.info().code, "missing-column");
    assert_eq!(err.info().context["column"], "literacy_outcome");
}

#[test]
fn headers_are_normalised_and_extras_ignored() {
    let mut header: Vec<String> = header()
        .into_iter()
        .map(|name| format!("  {}", name.replace('_', " ").to_uppercase()))
        .collect();
    header.push("Interviewer Notes".to_string());
    let mut r = row("30", "1");
    r.push("fine".to_string());
    let table = clean(&RawTable::from_rows(header, vec![r])).expect("clean");
    assert_eq!(table.records.len(), 1);
    assert!(!table.has_region_effect);
}

#[test]
fn csv_reader_feeds_the_cleaner() {
    let mut text = header().join(",");
    text.push('\n');
    text.push_str(&row("150", "1").join(","));
    text.push('\n');
    text.push_str(&row("30", "0").join(","));
    text.push('\n');
    let raw = RawTable::read_csv(text.as_bytes()).expect("read");
    assert_eq!(raw.len(), 2);
    let table = clean(&raw).expect("clean");
    assert_eq!(table.records[0].features[Feature::HouseholdPovertyRate], 100.0);
}

#[test]
fn ragged_csv_is_a_schema_error() {
    let text = "region,sex\nLagos,F,extra\n";
    let err = RawTable::read_csv(text.as_bytes()).expect_err("ragged");
    assert!(matches!(err, EdoError::Schema(_)));
}

#[test]
fn report_serializes_with_feature_names() {
    let raw = RawTable::from_rows(header(), vec![row("150", "1"), row("30", "0")]);
    let report = clean(&raw).expect("clean").report;
    let value = serde_json::to_value(&report).expect("json");
    assert_eq!(value["clipped"]["household_poverty_rate"], 1);
    assert_eq!(value["output_rows"], 2);
    assert_eq!(value["zscores_skipped"][0], "enrollment_rate");
}
