//! Delimited-text encoders for the synthesizer's tables.
//!
//! Floats are written with Rust's shortest round-trip representation, so a
//! table read back by the cleaning stage reproduces every value bit for bit.

use std::io::Write;

use edo_core::columns;
use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::{Feature, FeatureVector};

use crate::aggregate::StratumSummary;
use crate::groups::Stratum;
use crate::sample::Individual;

fn csv_error(err: impl ToString) -> EdoError {
    EdoError::Io(ErrorInfo::new("csv_write", err.to_string()))
}

fn key_header() -> Vec<String> {
    vec![
        columns::REGION.to_string(),
        columns::SEX.to_string(),
        columns::LOCATION.to_string(),
    ]
}

fn feature_header() -> impl Iterator<Item = String> {
    Feature::ALL.iter().map(|feature| feature.name().to_string())
}

fn feature_cells(features: &FeatureVector) -> impl Iterator<Item = String> + '_ {
    features.iter().map(|(_, value)| value.to_string())
}

/// Column order of the raw individual table.
pub fn individual_header() -> Vec<String> {
    let mut header = key_header();
    header.extend(feature_header());
    header.push(columns::REGION_EFFECT.to_string());
    header.push(columns::OUTCOME.to_string());
    header
}

/// Encodes one individual in [`individual_header`] order.
pub fn individual_row(individual: &Individual) -> Vec<String> {
    let key = individual.key;
    let mut row = vec![
        key.region.to_string(),
        key.sex.to_string(),
        key.location.to_string(),
    ];
    row.extend(feature_cells(&individual.features));
    row.push(individual.region_effect.to_string());
    row.push(u8::from(individual.outcome).to_string());
    row
}

fn write_rows<W, I>(writer: W, header: Vec<String>, rows: I) -> Result<(), EdoError>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&header).map_err(csv_error)?;
    for row in rows {
        csv.write_record(&row).map_err(csv_error)?;
    }
    csv.flush().map_err(csv_error)
}

/// Writes the raw individual table.
pub fn write_individuals<W: Write>(writer: W, individuals: &[Individual]) -> Result<(), EdoError> {
    write_rows(
        writer,
        individual_header(),
        individuals.iter().map(individual_row),
    )
}

/// Writes the stratum feature profiles, one row per stratum.
pub fn write_strata<W: Write>(writer: W, strata: &[Stratum]) -> Result<(), EdoError> {
    let mut header = key_header();
    header.extend(feature_header());
    header.push(columns::REGION_EFFECT.to_string());
    write_rows(
        writer,
        header,
        strata.iter().map(|stratum| {
            let mut row = vec![
                stratum.key.region.to_string(),
                stratum.key.sex.to_string(),
                stratum.key.location.to_string(),
            ];
            row.extend(feature_cells(&stratum.features));
            row.push(stratum.region_effect.to_string());
            row
        }),
    )
}

/// Writes the stratum summary table consumed by the reporting layer.
pub fn write_summaries<W: Write>(writer: W, summaries: &[StratumSummary]) -> Result<(), EdoError> {
    let mut header = key_header();
    header.extend(feature_header());
    header.push(columns::OUTCOME_RATE.to_string());
    header.push(columns::COUNT.to_string());
    write_rows(
        writer,
        header,
        summaries.iter().map(|summary| {
            let mut row = vec![
                summary.key.region.to_string(),
                summary.key.sex.to_string(),
                summary.key.location.to_string(),
            ];
            row.extend(feature_cells(&summary.means));
            row.push(summary.outcome_rate.to_string());
            row.push(summary.count.to_string());
            row
        }),
    )
}
