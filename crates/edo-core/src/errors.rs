//! Structured error types shared across the pipeline crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`EdoError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (row numbers, column names, sizes).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the pipeline.
///
/// Domain violations (out-of-range values, invalid outcomes) are never
/// reported through this type; they are repaired and counted by the stage
/// that encounters them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum EdoError {
    /// Required column absent or a value of the wrong type. Fatal.
    #[error("schema error: {0}")]
    Schema(ErrorInfo),
    /// A split or fit step cannot proceed on the supplied partition.
    #[error("partition error: {0}")]
    Partition(ErrorInfo),
    /// Numerical failure while fitting a model.
    #[error("model error: {0}")]
    Model(ErrorInfo),
    /// Invalid parameters or configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Filesystem and stream errors.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl EdoError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            EdoError::Schema(info)
            | EdoError::Partition(info)
            | EdoError::Model(info)
            | EdoError::Config(info)
            | EdoError::Io(info)
            | EdoError::Serde(info) => info,
        }
    }

    /// Shorthand for a schema error.
    pub fn schema(code: &str, message: impl Into<String>) -> Self {
        EdoError::Schema(ErrorInfo::new(code, message))
    }

    /// Shorthand for a degenerate-partition error.
    pub fn partition(code: &str, message: impl Into<String>) -> Self {
        EdoError::Partition(ErrorInfo::new(code, message))
    }

    /// Shorthand for a configuration error.
    pub fn config(code: &str, message: impl Into<String>) -> Self {
        EdoError::Config(ErrorInfo::new(code, message))
    }

    /// Wraps an IO failure with the path that triggered it.
    pub fn io(code: &str, path: &std::path::Path, err: impl ToString) -> Self {
        EdoError::Io(ErrorInfo::new(code, err.to_string()).with_context("path", path.display()))
    }
}
