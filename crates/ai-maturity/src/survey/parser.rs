use super::columns::{column_for_header, SurveyColumn};
use super::{RejectedRow, SurveyImportError};
use crate::assessment::{DimensionKey, DimensionScores, Submission, DIMENSION_COUNT};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Default)]
pub(crate) struct ParsedSurvey {
    pub(crate) submissions: Vec<Submission>,
    pub(crate) rejected: Vec<RejectedRow>,
}

/// Parses a survey export. Column lookup tolerates both header shapes; row
/// problems reject only the offending row.
pub(crate) fn parse_survey(text: &str) -> Result<ParsedSurvey, SurveyImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let layout = ColumnLayout::from_headers(reader.headers()?)?;
    let mut parsed = ParsedSurvey::default();
    let mut seen_ids = HashSet::new();

    for (offset, result) in reader.records().enumerate() {
        let fallback_line = offset as u64 + 2;
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or(fallback_line);
                parsed.rejected.push(RejectedRow {
                    line,
                    submission_id: None,
                    reason: format!("unreadable row: {err}"),
                });
                continue;
            }
        };
        let line = record.position().map(|pos| pos.line()).unwrap_or(fallback_line);

        if record.iter().all(|field| field.trim().is_empty()) {
            debug!(line, "skipping blank survey row");
            continue;
        }

        match layout.build_submission(&record) {
            Ok(submission) => {
                if seen_ids.insert(submission.submission_id.clone()) {
                    parsed.submissions.push(submission);
                } else {
                    parsed.rejected.push(RejectedRow {
                        line,
                        reason: format!(
                            "duplicate Submission ID '{}'",
                            submission.submission_id
                        ),
                        submission_id: Some(submission.submission_id),
                    });
                }
            }
            Err((submission_id, reason)) => parsed.rejected.push(RejectedRow {
                line,
                submission_id,
                reason,
            }),
        }
    }

    Ok(parsed)
}

struct ColumnLayout {
    positions: HashMap<SurveyColumn, usize>,
}

type RowRejection = (Option<String>, String);

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, SurveyImportError> {
        let mut positions = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(column) = column_for_header(header) {
                positions.entry(column).or_insert(index);
            }
        }

        let missing: Vec<String> = SurveyColumn::required()
            .into_iter()
            .filter(|column| !positions.contains_key(column))
            .map(SurveyColumn::canonical_name)
            .collect();
        if !missing.is_empty() {
            return Err(SurveyImportError::MissingColumns(missing));
        }

        Ok(Self { positions })
    }

    fn cell<'r>(&self, record: &'r csv::StringRecord, column: SurveyColumn) -> Option<&'r str> {
        self.positions
            .get(&column)
            .and_then(|index| record.get(*index))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn text(&self, record: &csv::StringRecord, column: SurveyColumn) -> String {
        self.cell(record, column).unwrap_or_default().to_string()
    }

    fn build_submission(&self, record: &csv::StringRecord) -> Result<Submission, RowRejection> {
        let submission_id = self
            .cell(record, SurveyColumn::SubmissionId)
            .map(str::to_string)
            .ok_or_else(|| (None, "missing Submission ID".to_string()))?;

        let mut scores = [None; DIMENSION_COUNT];
        for (slot, key) in scores.iter_mut().zip(DimensionKey::ordered()) {
            *slot = match self.cell(record, SurveyColumn::Dimension(key)) {
                Some(raw) => Some(parse_score(raw).map_err(|reason| {
                    (Some(submission_id.clone()), format!("{key}: {reason}"))
                })?),
                None => None,
            };
        }

        let bed_count = self.cell(record, SurveyColumn::BedCount).and_then(|raw| {
            let parsed = parse_bed_count(raw);
            if parsed.is_none() {
                debug!(submission_id = %submission_id, value = raw, "ignoring bed count that is not a whole number");
            }
            parsed
        });

        Ok(Submission {
            respondent_name: self.text(record, SurveyColumn::RespondentName),
            position: self.text(record, SurveyColumn::Position),
            hospital_name: self.text(record, SurveyColumn::HospitalName),
            hospital_location: self
                .cell(record, SurveyColumn::HospitalLocation)
                .map(str::to_string),
            bed_count,
            scores: DimensionScores::new(scores),
            submission_id,
        })
    }
}

fn parse_score(raw: &str) -> Result<f64, String> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("'{raw}' is not a number"))
}

/// Whole, non-negative bed counts only. `150.0` is accepted as 150 and
/// `1.200` as 1200; fractional values are rejected.
fn parse_bed_count(raw: &str) -> Option<u32> {
    if let Ok(value) = raw.parse::<u32>() {
        return Some(value);
    }
    if let Some(value) = parse_grouped_thousands(raw) {
        return Some(value);
    }

    let value = raw.replace(',', ".").parse::<f64>().ok()?;
    let whole = value.is_finite()
        && value >= 0.0
        && value.fract() == 0.0
        && value <= f64::from(u32::MAX);
    whole.then_some(value as u32)
}

/// One separator kind, 1-3 leading digits, then groups of exactly three.
fn parse_grouped_thousands(raw: &str) -> Option<u32> {
    let separator = raw.chars().find(|ch| matches!(ch, '.' | ','))?;
    let mut groups = raw.split(separator);
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 || !head.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_score_accepts_integers_and_decimal_commas() {
        assert_eq!(parse_score("12"), Ok(12.0));
        assert_eq!(parse_score("12.0"), Ok(12.0));
        assert_eq!(parse_score("7,5"), Ok(7.5));
        assert!(parse_score("tinggi").is_err());
        assert!(parse_score("NaN").is_err());
    }

    #[test]
    fn parse_bed_count_ignores_thousand_separators() {
        assert_eq!(parse_bed_count("1.200"), Some(1200));
        assert_eq!(parse_bed_count("1,200"), Some(1200));
        assert_eq!(parse_bed_count("2.500.000"), Some(2_500_000));
        assert_eq!(parse_bed_count("350"), Some(350));
        assert_eq!(parse_bed_count("sekitar 100"), None);
    }

    #[test]
    fn parse_bed_count_keeps_decimal_exports_at_their_value() {
        assert_eq!(parse_bed_count("150.0"), Some(150));
        assert_eq!(parse_bed_count("150,0"), Some(150));
        assert_eq!(parse_bed_count("12.5"), None);
        assert_eq!(parse_bed_count("1.20"), None);
        assert_eq!(parse_bed_count("-5"), None);
        assert_eq!(parse_bed_count("NaN"), None);
    }

    #[test]
    fn fractional_bed_count_is_dropped_without_rejecting_the_row() {
        let csv = "Submission ID,Dimensi 1,Dimensi 2,Dimensi 3,Dimensi 4,Dimensi 5,Nama Responden,Jabatan,Nama Rumah Sakit,Jumlah Tempat Tidur\n\
S-1,10,11,12,9,8,Dewi,Direktur,RS Sehat,150.0\n\
S-2,10,11,12,9,8,Budi,Direktur,RS Sentosa,12.5\n";
        let parsed = parse_survey(csv).expect("parses");
        assert!(parsed.rejected.is_empty());
        assert_eq!(parsed.submissions[0].bed_count, Some(150));
        assert_eq!(parsed.submissions[1].bed_count, None);
    }

    #[test]
    fn blank_dimension_cells_stay_absent() {
        let csv = "Submission ID,Dimensi 1,Dimensi 2,Dimensi 3,Dimensi 4,Dimensi 5,Nama Responden,Jabatan,Nama Rumah Sakit\n\
S-1,10,,12,9,8,Dewi,Direktur,RS Sehat\n";
        let parsed = parse_survey(csv).expect("parses");
        assert!(parsed.rejected.is_empty());
        let scores = parsed.submissions[0].scores;
        assert_eq!(scores.first_missing().map(DimensionKey::number), Some(2));
    }

    #[test]
    fn blank_rows_are_skipped_silently() {
        let csv = "Submission ID,Dimensi 1,Dimensi 2,Dimensi 3,Dimensi 4,Dimensi 5,Nama Responden,Jabatan,Nama Rumah Sakit\n\
S-1,10,11,12,9,8,Dewi,Direktur,RS Sehat\n\
,,,,,,,,\n";
        let parsed = parse_survey(csv).expect("parses");
        assert_eq!(parsed.submissions.len(), 1);
        assert!(parsed.rejected.is_empty());
    }
}
