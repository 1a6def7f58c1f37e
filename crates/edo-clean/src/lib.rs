#![deny(missing_docs)]
#![doc = "Validation and repair of raw individual tables. Domain violations are fixed and counted; only schema violations are fatal."]

pub mod derive;
pub mod raw;
pub mod record;
pub mod report;
pub mod schema;
mod validate;

use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::Feature;

pub use derive::{EnrollmentCategory, MotherEducationCategory, PovertyCategory, ZSCORE_FEATURES};
pub use raw::{normalize_column_name, RawTable};
pub use record::{CleanedRecord, CleanedTable};
pub use report::{CleaningReport, ZScoreStats};
pub use schema::ColumnMap;

/// Runs every cleaning step in order and returns a new table.
///
/// Header normalisation and typing may fail with [`EdoError::Schema`]. After
/// that nothing is fatal: duplicates, incomplete rows and invalid outcomes
/// are dropped, out-of-domain values are clipped, and each repair is counted
/// in the returned [`CleaningReport`].
pub fn clean(raw: &RawTable) -> Result<CleanedTable, EdoError> {
    let map = ColumnMap::resolve(&raw.header)?;
    let typed = schema::type_rows(raw, &map)?;
    let mut report = CleaningReport {
        input_rows: typed.len(),
        ..CleaningReport::default()
    };

    let unique = validate::dedupe(typed, &mut report);
    let repaired = validate::repair(unique, map.has_region_effect(), &mut report);
    // clipping can merge rows that only differed outside their domain
    let rows = validate::dedupe_repaired(repaired, &mut report);
    let stats = derive::zscore_stats(&rows, &mut report);

    let records: Vec<CleanedRecord> = rows
        .into_iter()
        .map(|row| {
            let mut zscores = [None; 4];
            for (slot, feature) in ZSCORE_FEATURES.iter().enumerate() {
                zscores[slot] = stats[slot].map(|s| (row.features[*feature] - s.mean) / s.sd);
            }
            CleanedRecord {
                poverty_category: PovertyCategory::of(
                    row.features[Feature::HouseholdPovertyRate],
                ),
                mother_education_category: MotherEducationCategory::of(
                    row.features[Feature::MotherEducationYears],
                ),
                enrollment_category: EnrollmentCategory::of(
                    row.features[Feature::EnrollmentRate],
                ),
                key: row.key,
                features: row.features,
                region_effect: row.region_effect,
                outcome: row.outcome,
                zscores,
            }
        })
        .collect();
    report.output_rows = records.len();

    tracing::info!(
        input = report.input_rows,
        output = report.output_rows,
        duplicates = report.duplicates_removed,
        missing = report.missing_removed,
        invalid_outcome = report.invalid_outcome_removed,
        clipped = report.total_clipped(),
        "cleaned individual table"
    );
    Ok(CleanedTable {
        records,
        has_region_effect: map.has_region_effect(),
        report,
    })
}

/// Loads a table that must already be clean.
///
/// Any repair the cleaning pass would make (a duplicate, a missing value, an
/// out-of-domain feature or a non-binary outcome) is reported as a schema
/// error instead. Derived columns are recomputed from the features.
pub fn load_cleaned(raw: &RawTable) -> Result<CleanedTable, EdoError> {
    let table = clean(raw)?;
    let report = &table.report;
    if !report.is_clean() {
        return Err(EdoError::Schema(
            ErrorInfo::new("not-cleaned", "table still needs repairs")
                .with_context("duplicates", report.duplicates_removed)
                .with_context("missing", report.missing_removed)
                .with_context("invalid_outcome", report.invalid_outcome_removed)
                .with_context("clipped", report.total_clipped())
                .with_hint("run the clean step first"),
        ));
    }
    Ok(table)
}
