//! Recommended-dose calculator.
//!
//! Pure arithmetic over a patient weight and a medication's weight-tier
//! coefficients. Lookup of the patient and medication is the caller's job;
//! this module never touches the store.

use crate::medication::Medication;

/// Patients lighter than this use the low-tier coefficient.
pub const LOW_WEIGHT_LIMIT_KG: f64 = 25.0;
/// Patients heavier than this use the high-tier coefficient.
pub const HIGH_WEIGHT_LIMIT_KG: f64 = 120.0;

/// The recommended ceiling, in medication units per day, for a patient of
/// the given weight.
///
/// Tier selection is exact: `weight < 25` uses the low coefficient,
/// `25 <= weight <= 120` the normal one, `weight > 120` the high one. When
/// the coefficients differ the function is deliberately discontinuous at the
/// tier boundaries; within a tier it is linear in the weight.
pub fn recommended_daily_dose(weight_kg: f64, medication: &Medication) -> f64 {
    if weight_kg < LOW_WEIGHT_LIMIT_KG {
        weight_kg * medication.rate_per_kg_low()
    } else if weight_kg <= HIGH_WEIGHT_LIMIT_KG {
        weight_kg * medication.rate_per_kg_normal()
    } else {
        weight_kg * medication.rate_per_kg_high()
    }
}
