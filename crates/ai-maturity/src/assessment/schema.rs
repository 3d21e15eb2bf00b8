use super::domain::{AssessmentError, DimensionKey, DIMENSION_COUNT};
use serde::Serialize;

/// Display name and weight for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionEntry {
    pub key: DimensionKey,
    pub name: &'static str,
    pub weight: f64,
}

/// Fixed weight table applied by the scorer and used for chart labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionSchema {
    entries: [DimensionEntry; DIMENSION_COUNT],
}

const fn entry(number: u8, name: &'static str, weight: f64) -> DimensionEntry {
    DimensionEntry {
        key: DimensionKey::ordered()[(number - 1) as usize],
        name,
        weight,
    }
}

const VARIANT_A: [DimensionEntry; DIMENSION_COUNT] = [
    entry(1, "Data & Infrastruktur", 0.25),
    entry(2, "SDM & Kompetensi", 0.20),
    entry(3, "Leadership & Strategi", 0.25),
    entry(4, "Implementasi Use Case AI", 0.20),
    entry(5, "Tata Kelola & Etika", 0.10),
];

const VARIANT_B: [DimensionEntry; DIMENSION_COUNT] = [
    entry(1, "Leadership & Strategi", 0.25),
    entry(2, "Data & Infrastruktur", 0.25),
    entry(3, "SDM & Kompetensi", 0.20),
    entry(4, "Tata Kelola & Etika", 0.10),
    entry(5, "Implementasi Use Case AI", 0.20),
];

impl DimensionSchema {
    pub const fn variant_a() -> Self {
        Self { entries: VARIANT_A }
    }

    pub const fn variant_b() -> Self {
        Self { entries: VARIANT_B }
    }

    /// Builds a schema from custom entries. Entry `i` must carry key `i + 1`.
    pub fn custom(entries: [DimensionEntry; DIMENSION_COUNT]) -> Result<Self, AssessmentError> {
        for (expected, entry) in DimensionKey::ordered().iter().zip(entries.iter()) {
            if entry.key != *expected {
                return Err(AssessmentError::InvalidDimension(entry.key.number()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[DimensionEntry; DIMENSION_COUNT] {
        &self.entries
    }

    pub fn entry(&self, number: u8) -> Result<&DimensionEntry, AssessmentError> {
        let key = DimensionKey::new(number)?;
        Ok(&self.entries[key.index()])
    }

    pub fn weight(&self, key: DimensionKey) -> f64 {
        self.entries[key.index()].weight
    }

    pub fn display_name(&self, key: DimensionKey) -> &'static str {
        self.entries[key.index()].name
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }
}
