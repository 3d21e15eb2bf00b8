use super::classifier::{Classifier, MaturityLevel};
use serde::Serialize;

/// One row of the side-by-side level overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRow {
    pub level: u8,
    pub name: &'static str,
    pub range: String,
    pub color: &'static str,
    pub is_current: bool,
    pub detail: MaturityLevel,
}

/// Lists every level of the active policy. Each row's detail is obtained by
/// classifying the midpoint of its range, so the table always agrees with
/// the classifier.
pub(crate) fn build_reference_table(
    classifier: &Classifier,
    current_level: Option<u8>,
) -> Vec<ReferenceRow> {
    let policy = classifier.policy();
    classifier
        .catalog()
        .levels()
        .iter()
        .filter_map(|content| {
            let range = policy.range_label(content.level)?;
            let representative = policy.representative_weighted(content.level)?;
            Some(ReferenceRow {
                level: content.level,
                name: content.name,
                range,
                color: content.color,
                is_current: current_level == Some(content.level),
                detail: classifier.classify(representative),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::classifier::{
        ClassificationPolicy, PERCENTAGE_LEVELS, RESCALED_RANGE_LEVELS,
    };

    #[test]
    fn rescaled_table_lists_five_ranges_and_marks_current() {
        let classifier = Classifier::new(ClassificationPolicy::RescaledRange, &RESCALED_RANGE_LEVELS);
        let rows = build_reference_table(&classifier, Some(3));

        let ranges: Vec<&str> = rows.iter().map(|row| row.range.as_str()).collect();
        assert_eq!(ranges, vec!["15-27", "28-39", "40-51", "52-63", "64-75"]);
        assert_eq!(
            rows.iter().filter(|row| row.is_current).map(|row| row.level).collect::<Vec<_>>(),
            vec![3]
        );
        assert!(rows.iter().all(|row| row.detail.level == row.level));
    }

    #[test]
    fn percentage_table_has_no_current_row_without_selection() {
        let classifier = Classifier::new(ClassificationPolicy::Percentage, &PERCENTAGE_LEVELS);
        let rows = build_reference_table(&classifier, None);

        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|row| !row.is_current));
        assert_eq!(rows[4].range, ">90-100%");
        assert_eq!(rows[4].detail.name, "Transformation");
    }
}
