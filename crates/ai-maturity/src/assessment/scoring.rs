use super::domain::{AssessmentError, DimensionKey, Submission, MAX_DIMENSION_SCORE};
use super::schema::DimensionSchema;
use serde::Serialize;

/// Weighted contribution of one dimension, kept for tabular display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub key: DimensionKey,
    pub name: &'static str,
    pub raw: f64,
    pub weighted: f64,
    pub weight_percent: f64,
}

/// Totals and per-dimension detail for a single submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub raw_total: f64,
    pub weighted_total: f64,
    pub percentage: f64,
    pub dimensions: Vec<DimensionScore>,
}

impl ScoreBreakdown {
    pub fn dimension(&self, key: DimensionKey) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|score| score.key == key)
    }
}

/// Applies the schema weights to a submission. Values are never rounded
/// here.
pub fn score_submission(
    submission: &Submission,
    schema: &DimensionSchema,
) -> Result<ScoreBreakdown, AssessmentError> {
    let mut dimensions = Vec::with_capacity(schema.entries().len());
    let mut raw_total = 0.0;
    let mut weighted_total = 0.0;

    for entry in schema.entries() {
        let raw = submission
            .scores
            .get(entry.key)
            .ok_or_else(|| AssessmentError::MissingDimension {
                submission_id: submission.submission_id.clone(),
                dimension: entry.key,
            })?;
        let weighted = raw * entry.weight;

        raw_total += raw;
        weighted_total += weighted;
        dimensions.push(DimensionScore {
            key: entry.key,
            name: entry.name,
            raw,
            weighted,
            weight_percent: entry.weight * 100.0,
        });
    }

    Ok(ScoreBreakdown {
        raw_total,
        weighted_total,
        percentage: weighted_total / MAX_DIMENSION_SCORE * 100.0,
        dimensions,
    })
}
