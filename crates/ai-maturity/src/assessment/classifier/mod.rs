mod levels;
mod policy;

pub use levels::{LevelCatalog, LevelContent, PERCENTAGE_LEVELS, RESCALED_RANGE_LEVELS};
pub use policy::ClassificationPolicy;

use levels::{INVALID_LEVEL_COLOR, INVALID_LEVEL_NAME, INVALID_LEVEL_NEXT_STEP};
use serde::Serialize;

/// Classification result with the narrative shown next to the score.
///
/// Level `0` is the out-of-range sentinel; its description embeds the value
/// that could not be placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaturityLevel {
    pub level: u8,
    pub name: &'static str,
    pub description: String,
    pub characteristics: Vec<String>,
    pub next_steps: Vec<String>,
    pub color: &'static str,
}

impl MaturityLevel {
    fn from_content(content: &LevelContent) -> Self {
        Self {
            level: content.level,
            name: content.name,
            description: content.description.to_string(),
            characteristics: content
                .characteristics
                .iter()
                .map(|line| line.to_string())
                .collect(),
            next_steps: content.next_steps.iter().map(|line| line.to_string()).collect(),
            color: content.color,
        }
    }

    fn invalid(policy: ClassificationPolicy, measure: f64, weighted_total: f64) -> Self {
        Self {
            level: 0,
            name: INVALID_LEVEL_NAME,
            description: format!(
                "Skor tidak valid: {measure:.2} (dari weighted: {weighted_total:.2})"
            ),
            characteristics: vec![format!("{}, got {measure:.2}", policy.domain_hint())],
            next_steps: vec![INVALID_LEVEL_NEXT_STEP.to_string()],
            color: INVALID_LEVEL_COLOR,
        }
    }

    /// Histogram key, e.g. `Level 4 - Scale-Up`.
    pub fn label(&self) -> String {
        format!("Level {} - {}", self.level, self.name)
    }

    pub fn is_valid(&self) -> bool {
        self.level != 0
    }
}

/// Pairs a boundary policy with the level content it resolves to.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    policy: ClassificationPolicy,
    catalog: &'static LevelCatalog,
}

impl Classifier {
    pub const fn new(policy: ClassificationPolicy, catalog: &'static LevelCatalog) -> Self {
        Self { policy, catalog }
    }

    pub const fn policy(&self) -> ClassificationPolicy {
        self.policy
    }

    pub const fn catalog(&self) -> &'static LevelCatalog {
        self.catalog
    }

    /// Out-of-domain totals resolve to level 0 rather than failing.
    pub fn classify(&self, weighted_total: f64) -> MaturityLevel {
        let measure = self.policy.measure(weighted_total);
        self.policy
            .level_for(measure)
            .and_then(|level| self.catalog.content(level))
            .map(MaturityLevel::from_content)
            .unwrap_or_else(|| MaturityLevel::invalid(self.policy, measure, weighted_total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rescaled() -> Classifier {
        Classifier::new(ClassificationPolicy::RescaledRange, &RESCALED_RANGE_LEVELS)
    }

    fn percentage() -> Classifier {
        Classifier::new(ClassificationPolicy::Percentage, &PERCENTAGE_LEVELS)
    }

    #[test]
    fn rescaled_policy_places_example_at_scale_up() {
        let level = rescaled().classify(11.1);
        assert_eq!(level.level, 4);
        assert_eq!(level.name, "Scale-Up");
        assert_eq!(level.label(), "Level 4 - Scale-Up");
        assert_eq!(level.characteristics.len(), 2);
        assert_eq!(level.next_steps.len(), 3);
        assert_eq!(level.color, "#42a5f5");
    }

    #[test]
    fn percentage_policy_covers_extremes() {
        let top = percentage().classify(15.0);
        assert_eq!(top.level, 5);
        assert_eq!(top.name, "Transformation");

        let bottom = percentage().classify(0.0);
        assert_eq!(bottom.level, 1);
        assert_eq!(bottom.name, "Awareness");
    }

    #[test]
    fn out_of_domain_totals_become_invalid_with_value_in_description() {
        let level = rescaled().classify(16.0);
        assert_eq!(level.level, 0);
        assert!(!level.is_valid());
        assert_eq!(level.name, "Invalid");
        assert!(level.description.contains("16.00"), "{}", level.description);
        assert!(level.description.contains("79.00"), "{}", level.description);
        assert_eq!(level.color, "#757575");

        let negative = percentage().classify(-3.0);
        assert_eq!(negative.level, 0);
        assert!(negative.description.contains("-3.00"), "{}", negative.description);
        assert!(negative.characteristics[0].starts_with("Percentage should be 0-100"));
    }

    #[test]
    fn non_finite_totals_are_invalid() {
        assert_eq!(rescaled().classify(f64::NAN).level, 0);
        assert_eq!(percentage().classify(f64::NEG_INFINITY).level, 0);
    }
}
