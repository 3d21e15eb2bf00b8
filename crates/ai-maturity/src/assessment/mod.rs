//! Weighted scoring and maturity classification.
//!
//! Every operation is a pure function of its inputs; a [`MaturityEngine`]
//! can be shared freely across threads.

mod aggregate;
pub mod classifier;
mod config;
pub mod domain;
mod reference;
pub mod report;
pub mod schema;
mod scoring;

pub use aggregate::{AggregateSummary, DimensionStatistics, SkippedSubmission, AVERAGE_SUBMISSION_ID};
pub use classifier::{ClassificationPolicy, Classifier, LevelCatalog, LevelContent, MaturityLevel};
pub use config::{AssessmentConfig, Variant};
pub use domain::{
    AssessmentError, DimensionKey, DimensionScores, Submission, DIMENSION_COUNT,
    MAX_DIMENSION_SCORE,
};
pub use reference::ReferenceRow;
pub use report::{PopulationReport, SubmissionAssessment, SubmissionReport};
pub use schema::{DimensionEntry, DimensionSchema};
pub use scoring::{score_submission, DimensionScore, ScoreBreakdown};

/// Stateless engine applying one deployment's configuration.
#[derive(Debug, Clone)]
pub struct MaturityEngine {
    config: AssessmentConfig,
    classifier: Classifier,
}

impl MaturityEngine {
    pub fn new(config: AssessmentConfig) -> Self {
        let classifier = config.classifier();
        Self { config, classifier }
    }

    pub fn for_variant(variant: Variant) -> Self {
        Self::new(AssessmentConfig::for_variant(variant))
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    pub fn schema(&self) -> &DimensionSchema {
        &self.config.schema
    }

    pub fn score(&self, submission: &Submission) -> Result<ScoreBreakdown, AssessmentError> {
        score_submission(submission, &self.config.schema)
    }

    pub fn classify(&self, weighted_total: f64) -> MaturityLevel {
        self.classifier.classify(weighted_total)
    }

    pub fn assess(&self, submission: &Submission) -> Result<SubmissionAssessment, AssessmentError> {
        let breakdown = self.score(submission)?;
        let level = self.classify(breakdown.weighted_total);
        Ok(SubmissionAssessment {
            submission_id: submission.submission_id.clone(),
            breakdown,
            level,
        })
    }

    /// Assesses each submission independently; one failure does not affect
    /// the others.
    pub fn assess_each(
        &self,
        submissions: &[Submission],
    ) -> Vec<Result<SubmissionAssessment, AssessmentError>> {
        submissions
            .iter()
            .map(|submission| self.assess(submission))
            .collect()
    }

    pub fn aggregate(&self, submissions: &[Submission]) -> Result<AggregateSummary, AssessmentError> {
        aggregate::aggregate_submissions(submissions, &self.config.schema, &self.classifier)
    }

    pub fn reference_table(&self, current_level: Option<u8>) -> Vec<ReferenceRow> {
        reference::build_reference_table(&self.classifier, current_level)
    }

    pub fn submission_report(
        &self,
        submission: &Submission,
    ) -> Result<SubmissionReport, AssessmentError> {
        let SubmissionAssessment {
            breakdown, level, ..
        } = self.assess(submission)?;
        let reference = self.reference_table(Some(level.level));
        Ok(SubmissionReport {
            submission: submission.clone(),
            breakdown,
            level,
            reference,
        })
    }

    pub fn population_report(
        &self,
        submissions: &[Submission],
    ) -> Result<PopulationReport, AssessmentError> {
        let summary = self.aggregate(submissions)?;
        let reference = self.reference_table(Some(summary.average_level.level));
        Ok(PopulationReport { summary, reference })
    }
}

impl Default for MaturityEngine {
    fn default() -> Self {
        Self::new(AssessmentConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_can_be_shared_across_threads() {
        assert_send_sync::<MaturityEngine>();

        let engine = std::sync::Arc::new(MaturityEngine::default());
        let worker = {
            let engine = engine.clone();
            std::thread::spawn(move || engine.classify(11.1).level)
        };
        assert_eq!(worker.join().expect("worker finished"), 4);
    }
}
