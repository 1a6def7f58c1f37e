//! Column resolution and cell typing.

use std::collections::BTreeMap;

use edo_core::columns;
use edo_core::errors::{EdoError, ErrorInfo};
use edo_core::{Feature, FeatureVector, Location, Region, Sex, StratumKey, FEATURE_COUNT};

use crate::raw::{normalize_column_name, RawTable};

/// Positions of the recognised columns inside a raw table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub(crate) region: usize,
    pub(crate) sex: usize,
    pub(crate) location: usize,
    pub(crate) features: [usize; FEATURE_COUNT],
    pub(crate) region_effect: Option<usize>,
    pub(crate) outcome: usize,
}

impl ColumnMap {
    /// Resolves required columns after header normalisation. Unknown columns are ignored.
    pub fn resolve(header: &[String]) -> Result<Self, EdoError> {
        let mut positions: BTreeMap<String, usize> = BTreeMap::new();
        for (idx, name) in header.iter().enumerate() {
            let normalized = normalize_column_name(name);
            if positions.insert(normalized.clone(), idx).is_some() {
                return Err(EdoError::Schema(
                    ErrorInfo::new("duplicate-column", "column appears twice after normalisation")
                        .with_context("column", normalized),
                ));
            }
        }
        let require = |name: &str| {
            positions.get(name).copied().ok_or_else(|| {
                EdoError::Schema(
                    ErrorInfo::new("missing-column", "required column is absent")
                        .with_context("column", name),
                )
            })
        };
        let mut features = [0; FEATURE_COUNT];
        for feature in Feature::ALL {
            features[feature.index()] = require(feature.name())?;
        }
        Ok(Self {
            region: require(columns::REGION)?,
            sex: require(columns::SEX)?,
            location: require(columns::LOCATION)?,
            features,
            region_effect: positions.get(columns::REGION_EFFECT).copied(),
            outcome: require(columns::OUTCOME)?,
        })
    }

    /// Whether the optional region effect column was supplied.
    pub fn has_region_effect(&self) -> bool {
        self.region_effect.is_some()
    }
}

/// One row after typing; `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TypedRow {
    pub region: Option<Region>,
    pub sex: Option<Sex>,
    pub location: Option<Location>,
    pub features: [Option<f64>; FEATURE_COUNT],
    pub region_effect: Option<f64>,
    pub outcome: Option<f64>,
}

/// A typed row with every required cell present.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompleteRow {
    pub key: StratumKey,
    pub features: FeatureVector,
    pub region_effect: Option<f64>,
    pub outcome: f64,
}

impl TypedRow {
    /// The populated row, or `None` when a cell the downstream stages rely on
    /// is missing.
    pub fn complete(&self, with_region_effect: bool) -> Option<CompleteRow> {
        let region_effect = match (with_region_effect, self.region_effect) {
            (true, None) => return None,
            (true, value) => value,
            (false, _) => None,
        };
        let mut features = [0.0; FEATURE_COUNT];
        for (slot, value) in features.iter_mut().zip(&self.features) {
            *slot = (*value)?;
        }
        Some(CompleteRow {
            key: StratumKey::new(self.region?, self.sex?, self.location?),
            features: FeatureVector::from_array(features),
            region_effect,
            outcome: self.outcome?,
        })
    }
}

fn cell_error(code: &str, message: &str, row: usize, column: &str, value: &str) -> EdoError {
    EdoError::Schema(
        ErrorInfo::new(code, message)
            .with_context("row", row)
            .with_context("column", column)
            .with_context("value", value),
    )
}

fn cell<'a>(row: &'a [Option<String>], idx: usize) -> Option<&'a str> {
    row.get(idx).and_then(|value| value.as_deref()).map(str::trim)
}

/// Parses a numeric cell. `NaN` and infinities count as missing.
fn numeric(row: &[Option<String>], idx: usize, line: usize, column: &str) -> Result<Option<f64>, EdoError> {
    match cell(row, idx) {
        None => Ok(None),
        Some(text) => {
            let value: f64 = text
                .parse()
                .map_err(|_| cell_error("non-numeric", "value is not a number", line, column, text))?;
            Ok(value.is_finite().then_some(value))
        }
    }
}

fn categorical<T>(row: &[Option<String>], idx: usize, line: usize, column: &str) -> Result<Option<T>, EdoError>
where
    T: std::str::FromStr<Err = EdoError>,
{
    match cell(row, idx) {
        None => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|_| {
            cell_error("unknown-category", "label is not a known category", line, column, text)
        }),
    }
}

/// Types every row of `raw`. Rows are numbered from 1 as data lines.
pub(crate) fn type_rows(raw: &RawTable, map: &ColumnMap) -> Result<Vec<TypedRow>, EdoError> {
    raw.rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let line = idx + 1;
            if row.len() != raw.header.len() {
                return Err(EdoError::Schema(
                    ErrorInfo::new("ragged-row", "row length differs from header length")
                        .with_context("row", line)
                        .with_context("expected", raw.header.len())
                        .with_context("found", row.len()),
                ));
            }
            let mut features = [None; FEATURE_COUNT];
            for feature in Feature::ALL {
                features[feature.index()] =
                    numeric(row, map.features[feature.index()], line, feature.name())?;
            }
            let region_effect = match map.region_effect {
                Some(col) => numeric(row, col, line, columns::REGION_EFFECT)?,
                None => None,
            };
            Ok(TypedRow {
                region: categorical(row, map.region, line, columns::REGION)?,
                sex: categorical(row, map.sex, line, columns::SEX)?,
                location: categorical(row, map.location, line, columns::LOCATION)?,
                features,
                region_effect,
                outcome: numeric(row, map.outcome, line, columns::OUTCOME)?,
            })
        })
        .collect()
}
