use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of scoring dimensions every survey carries.
pub const DIMENSION_COUNT: usize = 5;

/// Highest answer a respondent can give for a single dimension.
pub const MAX_DIMENSION_SCORE: f64 = 15.0;

/// One of the five survey dimensions, numbered 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DimensionKey(u8);

impl DimensionKey {
    pub fn new(number: u8) -> Result<Self, AssessmentError> {
        if (1..=DIMENSION_COUNT as u8).contains(&number) {
            Ok(Self(number))
        } else {
            Err(AssessmentError::InvalidDimension(number))
        }
    }

    pub const fn ordered() -> [Self; DIMENSION_COUNT] {
        [Self(1), Self(2), Self(3), Self(4), Self(5)]
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Canonical column label, e.g. `Dimensi 3`.
    pub fn column_label(self) -> String {
        format!("Dimensi {}", self.0)
    }
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dimensi {}", self.0)
    }
}

impl TryFrom<u8> for DimensionKey {
    type Error = AssessmentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DimensionKey> for u8 {
    fn from(value: DimensionKey) -> Self {
        value.0
    }
}

/// Raw answers for the five dimensions. A `None` means the value was absent
/// from the source row and must not be treated as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores([Option<f64>; DIMENSION_COUNT]);

impl DimensionScores {
    pub const fn new(values: [Option<f64>; DIMENSION_COUNT]) -> Self {
        Self(values)
    }

    pub fn complete(values: [f64; DIMENSION_COUNT]) -> Self {
        Self(values.map(Some))
    }

    pub fn get(&self, key: DimensionKey) -> Option<f64> {
        self.0[key.index()]
    }

    pub fn first_missing(&self) -> Option<DimensionKey> {
        DimensionKey::ordered()
            .into_iter()
            .find(|key| self.get(*key).is_none())
    }
}

impl From<[u8; DIMENSION_COUNT]> for DimensionScores {
    fn from(values: [u8; DIMENSION_COUNT]) -> Self {
        Self::complete(values.map(f64::from))
    }
}

/// One respondent's survey answers plus the descriptive fields shown next to
/// the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub submission_id: String,
    pub respondent_name: String,
    pub position: String,
    pub hospital_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bed_count: Option<u32>,
    pub scores: DimensionScores,
}

impl Submission {
    /// Bare submission carrying only an id and scores, handy for synthetic
    /// rows and tests.
    pub fn with_scores(submission_id: impl Into<String>, scores: DimensionScores) -> Self {
        Self {
            submission_id: submission_id.into(),
            respondent_name: String::new(),
            position: String::new(),
            hospital_name: String::new(),
            hospital_location: None,
            bed_count: None,
            scores,
        }
    }
}

/// Failures raised by the scoring engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("dimension {0} does not exist (expected 1..=5)")]
    InvalidDimension(u8),
    #[error("submission '{submission_id}' has no value for {dimension}")]
    MissingDimension {
        submission_id: String,
        dimension: DimensionKey,
    },
    #[error("no scorable submissions to aggregate")]
    EmptyCollection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_key_rejects_out_of_range_numbers() {
        assert_eq!(
            DimensionKey::new(0),
            Err(AssessmentError::InvalidDimension(0))
        );
        assert_eq!(
            DimensionKey::new(6),
            Err(AssessmentError::InvalidDimension(6))
        );
        assert_eq!(DimensionKey::new(5).map(DimensionKey::number), Ok(5));
    }

    #[test]
    fn first_missing_reports_lowest_absent_dimension() {
        let scores = DimensionScores::new([Some(3.0), None, Some(4.0), None, Some(1.0)]);
        assert_eq!(scores.first_missing().map(DimensionKey::number), Some(2));
        assert!(DimensionScores::from([1, 2, 3, 4, 5]).first_missing().is_none());
    }

    #[test]
    fn dimension_key_deserializes_through_validation() {
        let key: DimensionKey = serde_json::from_str("4").expect("valid key");
        assert_eq!(key.number(), 4);
        assert!(serde_json::from_str::<DimensionKey>("9").is_err());
    }
}
