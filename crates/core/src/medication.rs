//! Medication catalogue records.
//!
//! A medication carries the three weight-tier dosage coefficients used by the
//! recommended-dose calculator. Records are immutable once created; there is
//! no update path anywhere in the core.

use ordination_types::NonEmptyText;
use serde::{Deserialize, Serialize};

/// Identifier of a medication in the catalogue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MedicationId(u64);

impl MedicationId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MedicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An entry in the medication catalogue.
///
/// The three `rate_per_kg_*` coefficients are units per kilogram of patient
/// weight per day, one per weight tier (below 25 kg, 25-120 kg, above
/// 120 kg). They are expected to be non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    id: MedicationId,
    name: NonEmptyText,
    unit: NonEmptyText,
    rate_per_kg_low: f64,
    rate_per_kg_normal: f64,
    rate_per_kg_high: f64,
}

impl Medication {
    pub fn new(
        id: MedicationId,
        name: NonEmptyText,
        unit: NonEmptyText,
        rate_per_kg_low: f64,
        rate_per_kg_normal: f64,
        rate_per_kg_high: f64,
    ) -> Self {
        Self {
            id,
            name,
            unit,
            rate_per_kg_low,
            rate_per_kg_normal,
            rate_per_kg_high,
        }
    }

    pub fn id(&self) -> MedicationId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Unit label the dose quantities are expressed in (e.g. "Styk", "Ml").
    pub fn unit(&self) -> &str {
        self.unit.as_str()
    }

    pub fn rate_per_kg_low(&self) -> f64 {
        self.rate_per_kg_low
    }

    pub fn rate_per_kg_normal(&self) -> f64 {
        self.rate_per_kg_normal
    }

    pub fn rate_per_kg_high(&self) -> f64 {
        self.rate_per_kg_high
    }
}
