use super::classifier::{Classifier, MaturityLevel};
use super::domain::{
    AssessmentError, DimensionKey, DimensionScores, Submission, DIMENSION_COUNT,
};
use super::schema::DimensionSchema;
use super::scoring::{score_submission, ScoreBreakdown};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Identifier given to the synthetic population-average submission.
pub const AVERAGE_SUBMISSION_ID: &str = "average";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionStatistics {
    pub key: DimensionKey,
    pub name: &'static str,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; zero for a single submission.
    pub std_dev: f64,
}

/// Submission left out of the population figures because it could not be
/// scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedSubmission {
    pub submission_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub submission_count: usize,
    pub dimensions: Vec<DimensionStatistics>,
    pub average_submission: Submission,
    pub average_breakdown: ScoreBreakdown,
    pub average_level: MaturityLevel,
    pub level_distribution: BTreeMap<String, usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedSubmission>,
}

pub(crate) fn aggregate_submissions(
    submissions: &[Submission],
    schema: &DimensionSchema,
    classifier: &Classifier,
) -> Result<AggregateSummary, AssessmentError> {
    let mut scored: Vec<(&Submission, ScoreBreakdown)> = Vec::with_capacity(submissions.len());
    let mut skipped = Vec::new();

    for submission in submissions {
        match score_submission(submission, schema) {
            Ok(breakdown) => scored.push((submission, breakdown)),
            Err(err) => {
                warn!(submission_id = %submission.submission_id, error = %err, "submission skipped during aggregation");
                skipped.push(SkippedSubmission {
                    submission_id: submission.submission_id.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    if scored.is_empty() {
        return Err(AssessmentError::EmptyCollection);
    }

    let dimensions: Vec<DimensionStatistics> = schema
        .entries()
        .iter()
        .map(|entry| {
            let values: Vec<f64> = scored
                .iter()
                .filter_map(|(submission, _)| submission.scores.get(entry.key))
                .collect();
            let (mean, min, max, std_dev) = describe(&values);
            DimensionStatistics {
                key: entry.key,
                name: entry.name,
                mean,
                min,
                max,
                std_dev,
            }
        })
        .collect();

    let mut means = [0.0; DIMENSION_COUNT];
    for stats in &dimensions {
        means[stats.key.index()] = stats.mean;
    }

    let average_submission = Submission {
        submission_id: AVERAGE_SUBMISSION_ID.to_string(),
        respondent_name: format!("Rata-rata {} responden", scored.len()),
        position: String::new(),
        hospital_name: "Semua rumah sakit".to_string(),
        hospital_location: None,
        bed_count: None,
        scores: DimensionScores::complete(means),
    };
    let average_breakdown = score_submission(&average_submission, schema)?;
    let average_level = classifier.classify(average_breakdown.weighted_total);

    let mut level_distribution: BTreeMap<String, usize> = classifier
        .catalog()
        .levels()
        .iter()
        .map(|content| (format!("Level {} - {}", content.level, content.name), 0))
        .collect();
    for (_, breakdown) in &scored {
        let level = classifier.classify(breakdown.weighted_total);
        *level_distribution.entry(level.label()).or_insert(0) += 1;
    }

    Ok(AggregateSummary {
        submission_count: scored.len(),
        dimensions,
        average_submission,
        average_breakdown,
        average_level,
        level_distribution,
        skipped,
    })
}

/// Mean, min, max and sample standard deviation of a non-empty slice.
fn describe(values: &[f64]) -> (f64, f64, f64, f64) {
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let std_dev = if values.len() < 2 {
        0.0
    } else {
        let squared: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
        (squared / (count - 1.0)).sqrt()
    };
    (mean, min, max, std_dev)
}
