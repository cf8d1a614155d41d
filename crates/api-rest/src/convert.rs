//! Mapping between core domain types and wire DTOs.

use api_shared::dto;
use ordination_core::{Medication, Ordination, Patient, Schedule};

pub fn medication_res(medication: &Medication) -> dto::MedicationRes {
    dto::MedicationRes {
        id: medication.id().value(),
        name: medication.name().to_owned(),
        unit: medication.unit().to_owned(),
        rate_per_kg_low: medication.rate_per_kg_low(),
        rate_per_kg_normal: medication.rate_per_kg_normal(),
        rate_per_kg_high: medication.rate_per_kg_high(),
    }
}

pub fn ordination_summary(ordination: &Ordination) -> dto::OrdinationSummary {
    dto::OrdinationSummary {
        id: ordination.id().value(),
        medication_id: ordination.medication_id().value(),
        type_name: ordination.type_name().to_owned(),
        start: ordination.start(),
        end: ordination.end(),
        daily_dose: ordination.daily_dose(),
        total_dose: ordination.total_dose(),
    }
}

pub fn patient_res(patient: &Patient) -> dto::PatientRes {
    dto::PatientRes {
        id: patient.id().value(),
        national_id: patient.national_id().to_owned(),
        name: patient.name().to_owned(),
        weight_kg: patient.weight_kg(),
        ordinations: patient.ordinations().iter().map(ordination_summary).collect(),
    }
}

/// Returns `None` when the ordination is not an as-needed one.
pub fn pn_res(ordination: &Ordination) -> Option<dto::PnOrdinationRes> {
    match ordination.schedule() {
        Schedule::AsNeeded {
            units_per_administration,
            administrations,
        } => Some(dto::PnOrdinationRes {
            id: ordination.id().value(),
            medication_id: ordination.medication_id().value(),
            start: ordination.start(),
            end: ordination.end(),
            units_per_administration: *units_per_administration,
            administrations: administrations.clone(),
            daily_dose: ordination.daily_dose(),
            total_dose: ordination.total_dose(),
            type_name: ordination.type_name().to_owned(),
        }),
        _ => None,
    }
}

/// Returns `None` when the ordination is not a fixed-daily one.
pub fn daily_fixed_res(ordination: &Ordination) -> Option<dto::DailyFixedOrdinationRes> {
    match ordination.schedule() {
        Schedule::FixedDaily {
            morning,
            noon,
            evening,
            night,
        } => Some(dto::DailyFixedOrdinationRes {
            id: ordination.id().value(),
            medication_id: ordination.medication_id().value(),
            start: ordination.start(),
            end: ordination.end(),
            morning: *morning,
            noon: *noon,
            evening: *evening,
            night: *night,
            daily_dose: ordination.daily_dose(),
            total_dose: ordination.total_dose(),
            type_name: ordination.type_name().to_owned(),
        }),
        _ => None,
    }
}

/// Returns `None` when the ordination is not a variable-daily one.
pub fn daily_variable_res(ordination: &Ordination) -> Option<dto::DailyVariableOrdinationRes> {
    match ordination.schedule() {
        Schedule::VariableDaily { doses } => Some(dto::DailyVariableOrdinationRes {
            id: ordination.id().value(),
            medication_id: ordination.medication_id().value(),
            start: ordination.start(),
            end: ordination.end(),
            doses: doses
                .iter()
                .map(|d| dto::DoseSlot {
                    time: d.time,
                    quantity: d.quantity,
                })
                .collect(),
            daily_dose: ordination.daily_dose(),
            total_dose: ordination.total_dose(),
            type_name: ordination.type_name().to_owned(),
        }),
        _ => None,
    }
}
