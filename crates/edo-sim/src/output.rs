use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use edo_core::errors::EdoError;
use edo_core::serde::to_canonical_json_bytes;
use edo_core::{bytes_hash_string, stable_hash_string, RunProvenance, SchemaVersion};
use serde::Serialize;

use crate::config::PipelineConfig;

/// Table file names and their content hashes for the provenance record.
#[derive(Debug, Default)]
pub struct TableHashes(BTreeMap<String, String>);

impl TableHashes {
    /// Encodes a table in memory, writes it under `dir` and records its hash.
    pub fn write<F>(&mut self, dir: &Path, name: &str, encode: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&mut Vec<u8>) -> Result<(), EdoError>,
    {
        let mut bytes = Vec::new();
        encode(&mut bytes)?;
        let path = dir.join(name);
        fs::write(&path, &bytes).map_err(|err| EdoError::io("table_write", &path, err))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote table");
        self.0.insert(name.to_string(), bytes_hash_string(&bytes));
        Ok(())
    }

    /// Moves `other`'s entries in under `prefix/`.
    pub fn merge(&mut self, prefix: &str, other: TableHashes) {
        for (name, hash) in other.0 {
            self.0.insert(format!("{prefix}/{name}"), hash);
        }
    }

    /// Writes canonical JSON and records its hash.
    pub fn write_json<T: Serialize>(&mut self, dir: &Path, name: &str, value: &T) -> Result<(), Box<dyn Error>> {
        self.write(dir, name, |bytes| {
            bytes.extend(to_canonical_json_bytes(value)?);
            Ok(())
        })
    }
}

/// Writes `provenance.json` for the tables produced in this invocation.
pub fn write_provenance(
    dir: &Path,
    config: &PipelineConfig,
    tables: TableHashes,
) -> Result<(), Box<dyn Error>> {
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert("edo-sim".to_string(), env!("CARGO_PKG_VERSION").to_string());
    let provenance = RunProvenance {
        schema_version: SchemaVersion::default(),
        config_hash: stable_hash_string(config)?,
        table_hashes: tables.0,
        seed: config.seed,
        created_at: chrono::Utc::now().to_rfc3339(),
        tool_versions,
    };
    let path = dir.join("provenance.json");
    fs::write(&path, to_canonical_json_bytes(&provenance)?)
        .map_err(|err| EdoError::io("provenance_write", &path, err))?;
    Ok(())
}
