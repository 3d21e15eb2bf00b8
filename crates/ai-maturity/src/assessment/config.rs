use super::classifier::{
    ClassificationPolicy, Classifier, LevelCatalog, PERCENTAGE_LEVELS, RESCALED_RANGE_LEVELS,
};
use super::schema::DimensionSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named deployment profile bundling weights, boundary policy and level text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    A,
    B,
}

impl Variant {
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a" | "variant-a" | "rescaled" => Ok(Self::A),
            "b" | "variant-b" | "percentage" => Ok(Self::B),
            other => Err(format!("unknown assessment variant '{other}' (expected 'a' or 'b')")),
        }
    }
}

/// Everything the engine needs, selected once at startup.
#[derive(Debug, Clone)]
pub struct AssessmentConfig {
    pub schema: DimensionSchema,
    pub policy: ClassificationPolicy,
    pub levels: &'static LevelCatalog,
}

impl AssessmentConfig {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::A => Self::variant_a(),
            Variant::B => Self::variant_b(),
        }
    }

    pub fn variant_a() -> Self {
        Self {
            schema: DimensionSchema::variant_a(),
            policy: ClassificationPolicy::RescaledRange,
            levels: &RESCALED_RANGE_LEVELS,
        }
    }

    pub fn variant_b() -> Self {
        Self {
            schema: DimensionSchema::variant_b(),
            policy: ClassificationPolicy::Percentage,
            levels: &PERCENTAGE_LEVELS,
        }
    }

    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.policy, self.levels)
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self::variant_a()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("A".parse::<Variant>(), Ok(Variant::A));
        assert_eq!(" b ".parse::<Variant>(), Ok(Variant::B));
        assert!("c".parse::<Variant>().is_err());
    }

    #[test]
    fn variants_pair_schema_with_policy() {
        let a = AssessmentConfig::for_variant(Variant::A);
        assert_eq!(a.policy, ClassificationPolicy::RescaledRange);
        assert_eq!(a.schema, DimensionSchema::variant_a());

        let b = AssessmentConfig::for_variant(Variant::B);
        assert_eq!(b.policy, ClassificationPolicy::Percentage);
        assert_eq!(b.schema, DimensionSchema::variant_b());
    }
}
