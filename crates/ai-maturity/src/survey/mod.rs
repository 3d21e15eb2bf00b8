//! Survey export ingestion.
//!
//! Exports arrive in one of two header shapes (`Dimensi N` or
//! `Skor Dimensi N` with colon-suffixed labels); both are normalized into
//! [`Submission`] values before the assessment engine sees them.

mod columns;
mod normalizer;
mod parser;
mod source;

pub use source::{
    FileSource, InlineSource, LoadOutcome, SourceAttempt, SurveyLoader, SurveySource,
    SurveyUnavailable,
};

use crate::assessment::Submission;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Default fallback chain: the newer form export first, then the legacy one.
pub const DEFAULT_SURVEY_PATHS: [&str; 2] = [
    "SURVEY AI MATURITY ASSESSMENT RUMAH SAKIT - Form responses.csv",
    "Test Survey - Form responses.csv",
];

#[derive(Debug, thiserror::Error)]
pub enum SurveyImportError {
    #[error("failed to read survey export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid survey CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("required columns not found: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("survey data unavailable: {0}")]
    DataUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("submission '{0}' not found")]
    NotFound(String),
}

/// Row excluded from a dataset, with the reason it could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    pub reason: String,
}

/// Submissions materialized from one source.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyDataset {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub submissions: Vec<Submission>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected_rows: Vec<RejectedRow>,
}

impl SurveyDataset {
    pub fn find(&self, submission_id: &str) -> Result<&Submission, SelectionError> {
        let wanted = submission_id.trim();
        self.submissions
            .iter()
            .find(|submission| submission.submission_id == wanted)
            .ok_or_else(|| SelectionError::NotFound(wanted.to_string()))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.submissions
            .iter()
            .map(|submission| submission.submission_id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

pub struct SurveyImporter;

impl SurveyImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SurveyDataset, SurveyImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, path.display().to_string())
    }

    pub fn from_reader<R: Read>(
        mut reader: R,
        source: impl Into<String>,
    ) -> Result<SurveyDataset, SurveyImportError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_text(&text, source)
    }

    /// Rejects HTML bodies (an access-denied page served instead of CSV) and
    /// exports without data rows.
    pub fn from_text(
        text: &str,
        source: impl Into<String>,
    ) -> Result<SurveyDataset, SurveyImportError> {
        let source = source.into();
        let body = text.trim_start_matches('\u{feff}').trim_start();
        if body.starts_with('<') {
            return Err(SurveyImportError::DataUnavailable(format!(
                "{source} returned an HTML page instead of CSV; the sheet must be shared publicly"
            )));
        }

        let parsed = parser::parse_survey(body)?;
        for row in &parsed.rejected {
            warn!(source = %source, line = row.line, reason = %row.reason, "survey row rejected");
        }

        if parsed.submissions.is_empty() {
            return Err(SurveyImportError::DataUnavailable(format!(
                "{source} contains no survey rows"
            )));
        }

        Ok(SurveyDataset {
            source,
            loaded_at: Utc::now(),
            submissions: parsed.submissions,
            rejected_rows: parsed.rejected,
        })
    }
}
