//! Patient registry records.

use ordination_types::NonEmptyText;
use serde::{Deserialize, Serialize};

use crate::ordination::{Ordination, OrdinationId};

/// Identifier of a patient.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PatientId(u64);

impl PatientId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A patient and the ordinations they exclusively own.
///
/// Ordinations are appended by the ordination service and live and die with
/// the patient; there are no back-references from an ordination to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    id: PatientId,
    national_id: String,
    name: NonEmptyText,
    /// Weight in kilograms. Expected to be positive; the dose calculator
    /// does not enforce this.
    weight_kg: f64,
    ordinations: Vec<Ordination>,
}

impl Patient {
    pub fn new(id: PatientId, national_id: String, name: NonEmptyText, weight_kg: f64) -> Self {
        Self {
            id,
            national_id,
            name,
            weight_kg,
            ordinations: Vec::new(),
        }
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn ordinations(&self) -> &[Ordination] {
        &self.ordinations
    }

    pub fn ordination(&self, id: OrdinationId) -> Option<&Ordination> {
        self.ordinations.iter().find(|o| o.id() == id)
    }

    pub(crate) fn ordination_mut(&mut self, id: OrdinationId) -> Option<&mut Ordination> {
        self.ordinations.iter_mut().find(|o| o.id() == id)
    }

    pub(crate) fn attach_ordination(&mut self, ordination: Ordination) {
        self.ordinations.push(ordination);
    }
}
