use crate::assessment::domain::MAX_DIMENSION_SCORE;
use serde::{Deserialize, Serialize};

/// Absorbs floating-point noise around round-number bounds.
const TOLERANCE: f64 = 1e-9;

const RESCALED_MIN: f64 = 15.0;
const RESCALED_MAX: f64 = 75.0;
const RESCALED_SPAN: f64 = 60.0;

/// Closed integer band on the rescaled 15..=75 axis.
#[derive(Debug, Clone, Copy)]
struct RangeBand {
    level: u8,
    lower: u8,
    upper: u8,
}

const RESCALED_BANDS: [RangeBand; 5] = [
    RangeBand { level: 1, lower: 15, upper: 27 },
    RangeBand { level: 2, lower: 28, upper: 39 },
    RangeBand { level: 3, lower: 40, upper: 51 },
    RangeBand { level: 4, lower: 52, upper: 63 },
    RangeBand { level: 5, lower: 64, upper: 75 },
];

/// Inclusive upper bound on the 0..=100 percentage axis.
#[derive(Debug, Clone, Copy)]
struct PercentageThreshold {
    level: u8,
    upper: f64,
}

const PERCENTAGE_THRESHOLDS: [PercentageThreshold; 5] = [
    PercentageThreshold { level: 1, upper: 35.0 },
    PercentageThreshold { level: 2, upper: 55.0 },
    PercentageThreshold { level: 3, upper: 75.0 },
    PercentageThreshold { level: 4, upper: 90.0 },
    PercentageThreshold { level: 5, upper: 100.0 },
];

/// Boundary rule mapping a weighted total onto a level number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationPolicy {
    /// Rescale 0..=15 onto 15..=75 and match fixed integer bands.
    RescaledRange,
    /// Convert to a percentage and match ascending inclusive upper bounds.
    Percentage,
}

impl ClassificationPolicy {
    /// Value the thresholds are compared against.
    pub fn measure(self, weighted_total: f64) -> f64 {
        match self {
            Self::RescaledRange => weighted_total / MAX_DIMENSION_SCORE * RESCALED_SPAN + RESCALED_MIN,
            Self::Percentage => weighted_total / MAX_DIMENSION_SCORE * 100.0,
        }
    }

    pub const fn domain(self) -> (f64, f64) {
        match self {
            Self::RescaledRange => (RESCALED_MIN, RESCALED_MAX),
            Self::Percentage => (0.0, 100.0),
        }
    }

    /// Level number for a measured value, or `None` when it falls outside the
    /// policy domain.
    pub fn level_for(self, measure: f64) -> Option<u8> {
        let (min, max) = self.domain();
        if !measure.is_finite() || measure < min - TOLERANCE || measure > max + TOLERANCE {
            return None;
        }

        match self {
            // Values between two integer bands stay in the lower band.
            Self::RescaledRange => RESCALED_BANDS
                .iter()
                .rev()
                .find(|band| measure >= f64::from(band.lower) - TOLERANCE)
                .map(|band| band.level),
            Self::Percentage => PERCENTAGE_THRESHOLDS
                .iter()
                .find(|threshold| measure <= threshold.upper + TOLERANCE)
                .map(|threshold| threshold.level),
        }
    }

    /// Human readable range for the reference table.
    pub fn range_label(self, level: u8) -> Option<String> {
        match self {
            Self::RescaledRange => RESCALED_BANDS
                .iter()
                .find(|band| band.level == level)
                .map(|band| format!("{}-{}", band.lower, band.upper)),
            Self::Percentage => {
                let (lower, upper) = self.percentage_bounds(level)?;
                if lower <= 0.0 {
                    Some(format!("0-{upper:.0}%"))
                } else {
                    Some(format!(">{lower:.0}-{upper:.0}%"))
                }
            }
        }
    }

    /// Weighted total sitting in the middle of a level's range.
    pub fn representative_weighted(self, level: u8) -> Option<f64> {
        match self {
            Self::RescaledRange => RESCALED_BANDS
                .iter()
                .find(|band| band.level == level)
                .map(|band| {
                    let midpoint = (f64::from(band.lower) + f64::from(band.upper)) / 2.0;
                    (midpoint - RESCALED_MIN) / RESCALED_SPAN * MAX_DIMENSION_SCORE
                }),
            Self::Percentage => self.percentage_bounds(level).map(|(lower, upper)| {
                let midpoint = (lower + upper) / 2.0;
                midpoint / 100.0 * MAX_DIMENSION_SCORE
            }),
        }
    }

    pub const fn domain_hint(self) -> &'static str {
        match self {
            Self::RescaledRange => "Score range should be 15-75",
            Self::Percentage => "Percentage should be 0-100",
        }
    }

    fn percentage_bounds(self, level: u8) -> Option<(f64, f64)> {
        let position = PERCENTAGE_THRESHOLDS
            .iter()
            .position(|threshold| threshold.level == level)?;
        let lower = match position {
            0 => 0.0,
            _ => PERCENTAGE_THRESHOLDS[position - 1].upper,
        };
        Some((lower, PERCENTAGE_THRESHOLDS[position].upper))
    }
}
