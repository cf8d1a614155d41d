//! Request and response bodies for the ordination API.
//!
//! All identifiers travel as plain integers on the wire. Dates are ISO-8601
//! calendar dates (`YYYY-MM-DD`), administration timestamps are naive
//! date-times, and dose-slot times are times of day (`HH:MM:SS`).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned for 4xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// A medication catalogue entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MedicationRes {
    pub id: u64,
    pub name: String,
    /// Unit label the dose quantities are expressed in (e.g. "Styk", "Ml").
    pub unit: String,
    pub rate_per_kg_low: f64,
    pub rate_per_kg_normal: f64,
    pub rate_per_kg_high: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListMedicationsRes {
    pub medications: Vec<MedicationRes>,
}

/// Variant-agnostic view of an ordination, used inside patient listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrdinationSummary {
    pub id: u64,
    pub medication_id: u64,
    /// "PN", "DagligFast" or "DagligSkæv".
    pub type_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub daily_dose: f64,
    pub total_dose: f64,
}

/// A patient with their owned ordinations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub id: u64,
    pub national_id: String,
    pub name: String,
    pub weight_kg: f64,
    pub ordinations: Vec<OrdinationSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListPatientsRes {
    pub patients: Vec<PatientRes>,
}

/// One dose slot of a variable-daily ordination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct DoseSlot {
    pub time: NaiveTime,
    pub quantity: f64,
}

/// An as-needed ("PN") ordination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PnOrdinationRes {
    pub id: u64,
    pub medication_id: u64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub units_per_administration: f64,
    pub administrations: Vec<NaiveDateTime>,
    pub daily_dose: f64,
    pub total_dose: f64,
    pub type_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListPnOrdinationsRes {
    pub ordinations: Vec<PnOrdinationRes>,
}

/// A fixed-daily ("DagligFast") ordination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyFixedOrdinationRes {
    pub id: u64,
    pub medication_id: u64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub morning: f64,
    pub noon: f64,
    pub evening: f64,
    pub night: f64,
    pub daily_dose: f64,
    pub total_dose: f64,
    pub type_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListDailyFixedOrdinationsRes {
    pub ordinations: Vec<DailyFixedOrdinationRes>,
}

/// A variable-daily ("DagligSkæv") ordination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyVariableOrdinationRes {
    pub id: u64,
    pub medication_id: u64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub doses: Vec<DoseSlot>,
    pub daily_dose: f64,
    pub total_dose: f64,
    pub type_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListDailyVariableOrdinationsRes {
    pub ordinations: Vec<DailyVariableOrdinationRes>,
}

/// Request to create an as-needed ordination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePnOrdinationReq {
    pub patient_id: u64,
    pub medication_id: u64,
    pub units_per_administration: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Request to create a fixed-daily ordination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDailyFixedOrdinationReq {
    pub patient_id: u64,
    pub medication_id: u64,
    pub morning: f64,
    pub noon: f64,
    pub evening: f64,
    pub night: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Request to create a variable-daily ordination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDailyVariableOrdinationReq {
    pub patient_id: u64,
    pub medication_id: u64,
    pub doses: Vec<DoseSlot>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Request to mark an ordination as administered.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordAdministrationReq {
    pub given_at: NaiveDateTime,
}

/// Outcome of an administration request. `ok` is false when the date was
/// outside the validity period or the ordination does not exist.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdministrationRes {
    pub ok: bool,
    pub message: String,
}

/// The weight-tiered recommended daily ceiling for a patient/medication pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendedDoseRes {
    pub patient_id: u64,
    pub medication_id: u64,
    pub recommended_daily_dose: f64,
}
