//! Cleaned rows and the table that carries them to disk.

use std::io::Write;

use edo_core::columns;
use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::{Feature, FeatureVector, StratumKey, StratumRecord};
use serde::{Deserialize, Serialize};

use crate::derive::{
    zscore_slot, EnrollmentCategory, MotherEducationCategory, PovertyCategory, ZSCORE_FEATURES,
};
use crate::raw::RawTable;
use crate::report::CleaningReport;

/// A validated individual with its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    /// Stratum identity.
    pub key: StratumKey,
    /// Features clipped into their cleaning domains.
    pub features: FeatureVector,
    /// Region effect, when the input carried one.
    pub region_effect: Option<f64>,
    /// Binary outcome.
    pub outcome: bool,
    /// Z-scores in [`ZSCORE_FEATURES`] order; absent when skipped.
    pub zscores: [Option<f64>; 4],
    /// Poverty band.
    pub poverty_category: Option<PovertyCategory>,
    /// Mother's schooling level.
    pub mother_education_category: Option<MotherEducationCategory>,
    /// Enrollment band.
    pub enrollment_category: Option<EnrollmentCategory>,
}

impl CleanedRecord {
    /// Z-score of `feature`, if it has one.
    pub fn zscore(&self, feature: Feature) -> Option<f64> {
        zscore_slot(feature).and_then(|slot| self.zscores[slot])
    }
}

impl StratumRecord for CleanedRecord {
    fn stratum(&self) -> StratumKey {
        self.key
    }

    fn features(&self) -> &FeatureVector {
        &self.features
    }

    fn outcome(&self) -> bool {
        self.outcome
    }
}

/// Output of one cleaning pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedTable {
    /// Surviving records in input order.
    pub records: Vec<CleanedRecord>,
    /// Whether the region effect column is carried.
    pub has_region_effect: bool,
    /// Repair counts.
    pub report: CleaningReport,
}

fn zscore_column(feature: Feature) -> String {
    format!("{}{}", feature.name(), columns::ZSCORE_SUFFIX)
}

fn opt<T: ToString>(value: Option<T>) -> Option<String> {
    value.map(|v| v.to_string())
}

impl CleanedTable {
    /// Column order of the cleaned table.
    pub fn header(&self) -> Vec<String> {
        let mut header = vec![
            columns::REGION.to_string(),
            columns::SEX.to_string(),
            columns::LOCATION.to_string(),
        ];
        header.extend(Feature::ALL.iter().map(|f| f.name().to_string()));
        if self.has_region_effect {
            header.push(columns::REGION_EFFECT.to_string());
        }
        header.push(columns::OUTCOME.to_string());
        header.extend(ZSCORE_FEATURES.iter().map(|f| zscore_column(*f)));
        header.push(PovertyCategory::COLUMN.to_string());
        header.push(MotherEducationCategory::COLUMN.to_string());
        header.push(EnrollmentCategory::COLUMN.to_string());
        header
    }

    fn row(&self, record: &CleanedRecord) -> Vec<Option<String>> {
        let mut row = vec![
            Some(record.key.region.to_string()),
            Some(record.key.sex.to_string()),
            Some(record.key.location.to_string()),
        ];
        row.extend(record.features.iter().map(|(_, v)| Some(v.to_string())));
        if self.has_region_effect {
            row.push(opt(record.region_effect));
        }
        row.push(Some(u8::from(record.outcome).to_string()));
        row.extend(record.zscores.iter().map(|z| opt(*z)));
        row.push(opt(record.poverty_category));
        row.push(opt(record.mother_education_category));
        row.push(opt(record.enrollment_category));
        row
    }

    /// Re-encodes the table as untyped cells, e.g. to clean it again.
    pub fn to_raw(&self) -> RawTable {
        RawTable {
            header: self.header(),
            rows: self.records.iter().map(|record| self.row(record)).collect(),
        }
    }

    /// Writes the cleaned table; absent derived values become empty cells.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), EdoError> {
        let write_error = |err: csv::Error| EdoError::Io(ErrorInfo::new("csv_write", err.to_string()));
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.header()).map_err(write_error)?;
        for record in &self.records {
            let cells = self.row(record);
            csv.write_record(cells.iter().map(|cell| cell.as_deref().unwrap_or("")))
                .map_err(write_error)?;
        }
        csv.flush()
            .map_err(|err| EdoError::Io(ErrorInfo::new("csv_write", err.to_string())))
    }
}
