use super::aggregate::AggregateSummary;
use super::classifier::MaturityLevel;
use super::domain::Submission;
use super::reference::ReferenceRow;
use super::scoring::ScoreBreakdown;
use serde::Serialize;

/// Score and level for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionAssessment {
    pub submission_id: String,
    pub breakdown: ScoreBreakdown,
    pub level: MaturityLevel,
}

/// Everything needed to render a single respondent's result page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReport {
    pub submission: Submission,
    pub breakdown: ScoreBreakdown,
    pub level: MaturityLevel,
    pub reference: Vec<ReferenceRow>,
}

/// Population dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationReport {
    pub summary: AggregateSummary,
    pub reference: Vec<ReferenceRow>,
}
