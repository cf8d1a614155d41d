//! Ordination creation, dose validation and administration recording.
//!
//! All three creation paths share one validation skeleton and run as a single
//! transaction under the store mutex, so validation always sees the state it
//! is about to mutate and a failed validation leaves nothing behind.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::dosage;
use crate::error::{OrdinationError, OrdinationResult};
use crate::medication::{Medication, MedicationId};
use crate::ordination::{AdministrationOutcome, Dose, Ordination, OrdinationId, Schedule};
use crate::patient::{Patient, PatientId};
use crate::store::OrdinationStore;

/// Service layer over the ordination store.
#[derive(Clone)]
pub struct OrdinationService {
    store: Arc<OrdinationStore>,
}

impl OrdinationService {
    pub fn new(store: Arc<OrdinationStore>) -> Self {
        Self { store }
    }

    /// Creates an as-needed ("PN") ordination.
    ///
    /// `units` is the quantity handed out per administration and is validated
    /// against the patient's recommended daily ceiling.
    ///
    /// # Errors
    ///
    /// Returns an error if the patient or medication does not exist, the end
    /// date precedes the start date, or the requested dose is negative, zero
    /// or above the recommended daily dose.
    pub fn create_as_needed(
        &self,
        patient_id: PatientId,
        medication_id: MedicationId,
        units: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> OrdinationResult<Ordination> {
        self.create(
            patient_id,
            medication_id,
            start,
            end,
            Schedule::AsNeeded {
                units_per_administration: units,
                administrations: Vec::new(),
            },
        )
    }

    /// Creates a fixed-daily ("DagligFast") ordination with one quantity per
    /// fixed time slot.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`create_as_needed`](Self::create_as_needed);
    /// the validated dose is the sum of the four slot quantities.
    #[allow(clippy::too_many_arguments)]
    pub fn create_fixed_daily(
        &self,
        patient_id: PatientId,
        medication_id: MedicationId,
        morning: f64,
        noon: f64,
        evening: f64,
        night: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> OrdinationResult<Ordination> {
        self.create(
            patient_id,
            medication_id,
            start,
            end,
            Schedule::FixedDaily {
                morning,
                noon,
                evening,
                night,
            },
        )
    }

    /// Creates a variable-daily ("DagligSkæv") ordination from caller-defined
    /// dose slots.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`create_as_needed`](Self::create_as_needed);
    /// the validated dose is the sum of the slot quantities.
    pub fn create_variable_daily(
        &self,
        patient_id: PatientId,
        medication_id: MedicationId,
        doses: Vec<Dose>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> OrdinationResult<Ordination> {
        self.create(
            patient_id,
            medication_id,
            start,
            end,
            Schedule::VariableDaily { doses },
        )
    }

    /// Shared creation skeleton: resolve, validate, construct, attach.
    ///
    /// The date and dose checks apply to every variant. Validation runs to
    /// completion before the ordination is attached, so no error leaves a
    /// partial write.
    fn create(
        &self,
        patient_id: PatientId,
        medication_id: MedicationId,
        start: NaiveDate,
        end: NaiveDate,
        schedule: Schedule,
    ) -> OrdinationResult<Ordination> {
        self.store.with(|inner| {
            let weight_kg = inner
                .patient(patient_id)
                .ok_or(OrdinationError::PatientNotFound(patient_id))?
                .weight_kg();
            let medication = inner
                .medication(medication_id)
                .ok_or(OrdinationError::MedicationNotFound(medication_id))?;

            if end < start {
                return Err(OrdinationError::EndBeforeStart { start, end });
            }

            let requested = schedule.requested_daily_dose();
            if requested < 0.0 {
                return Err(OrdinationError::NegativeDose);
            }
            if requested == 0.0 {
                return Err(OrdinationError::UnspecifiedDose);
            }

            let recommended = dosage::recommended_daily_dose(weight_kg, medication);
            if requested > recommended {
                return Err(OrdinationError::ExceedsRecommendedDose {
                    requested,
                    recommended,
                });
            }

            let id = inner.allocate_ordination_id();
            let ordination = Ordination::new(id, medication_id, start, end, schedule);
            tracing::info!(
                ordination = %id,
                patient = %patient_id,
                medication = %medication_id,
                variant = ordination.type_name(),
                requested,
                recommended,
                "created ordination"
            );

            inner
                .patient_mut(patient_id)
                .ok_or(OrdinationError::PatientNotFound(patient_id))?
                .attach_ordination(ordination.clone());
            Ok(ordination)
        })
    }

    /// Marks an ordination as administered at `given_at`.
    ///
    /// Returns an outcome value rather than an error: an unknown id and a
    /// date outside the validity period are expected results the caller
    /// handles as ordinary control flow. Only the as-needed variant stores
    /// the event; the daily variants acknowledge without recording.
    pub fn record_administration(
        &self,
        ordination_id: OrdinationId,
        given_at: NaiveDateTime,
    ) -> AdministrationOutcome {
        self.store.with(|inner| {
            let Some(ordination) = inner.ordination_mut(ordination_id) else {
                return AdministrationOutcome::UnknownOrdination { ordination_id };
            };

            if !ordination.in_validity_period(given_at.date()) {
                return AdministrationOutcome::OutsideValidityPeriod {
                    given_at,
                    start: ordination.start(),
                    end: ordination.end(),
                };
            }

            let stored = ordination.note_administration(given_at);
            tracing::info!(
                ordination = %ordination_id,
                %given_at,
                stored,
                "administration acknowledged"
            );
            AdministrationOutcome::Recorded {
                ordination_id,
                given_at,
            }
        })
    }

    /// The recommended daily ceiling for `patient_id` on `medication_id`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when either id is dangling; the arithmetic
    /// itself lives in [`dosage::recommended_daily_dose`] and cannot fail.
    pub fn recommended_daily_dose(
        &self,
        patient_id: PatientId,
        medication_id: MedicationId,
    ) -> OrdinationResult<f64> {
        self.store.with(|inner| {
            let patient = inner
                .patient(patient_id)
                .ok_or(OrdinationError::PatientNotFound(patient_id))?;
            let medication = inner
                .medication(medication_id)
                .ok_or(OrdinationError::MedicationNotFound(medication_id))?;
            Ok(dosage::recommended_daily_dose(
                patient.weight_kg(),
                medication,
            ))
        })
    }

    /// All patients with their owned ordinations.
    pub fn patients(&self) -> Vec<Patient> {
        self.store.patients()
    }

    /// The medication catalogue.
    pub fn medications(&self) -> Vec<Medication> {
        self.store.medications()
    }

    /// All as-needed ordinations across all patients.
    pub fn as_needed_ordinations(&self) -> Vec<Ordination> {
        self.ordinations_by_type("PN")
    }

    /// All fixed-daily ordinations across all patients.
    pub fn fixed_daily_ordinations(&self) -> Vec<Ordination> {
        self.ordinations_by_type("DagligFast")
    }

    /// All variable-daily ordinations across all patients.
    pub fn variable_daily_ordinations(&self) -> Vec<Ordination> {
        self.ordinations_by_type("DagligSkæv")
    }

    fn ordinations_by_type(&self, type_name: &str) -> Vec<Ordination> {
        self.store
            .patients()
            .into_iter()
            .flat_map(|p| p.ordinations().to_vec())
            .filter(|o| o.type_name() == type_name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono::NaiveTime;
    use ordination_types::NonEmptyText;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    /// One 63.4 kg patient and one medication at 1.0/1.5/2.0 units/kg/day,
    /// giving a recommended ceiling of 95.1 units.
    fn service_with_one_patient() -> (OrdinationService, PatientId, MedicationId) {
        let store = Arc::new(OrdinationStore::new());
        let patient = store.add_patient(
            "121256-0512",
            NonEmptyText::new("Jane Jensen").expect("valid name"),
            63.4,
        );
        let medication = store.add_medication(
            NonEmptyText::new("Paracetamol").expect("valid name"),
            NonEmptyText::new("Ml").expect("valid unit"),
            1.0,
            1.5,
            2.0,
        );
        (
            OrdinationService::new(store),
            patient.id(),
            medication.id(),
        )
    }

    #[test]
    fn creates_as_needed_and_attaches_to_patient() {
        let (service, patient_id, medication_id) = service_with_one_patient();

        let ordination = service
            .create_as_needed(
                patient_id,
                medication_id,
                1.0,
                date(2024, 11, 1),
                date(2024, 11, 5),
            )
            .expect("creation succeeds");

        assert_eq!(ordination.type_name(), "PN");
        assert_eq!(ordination.medication_id(), medication_id);
        assert_eq!(ordination.start(), date(2024, 11, 1));
        assert_eq!(ordination.end(), date(2024, 11, 5));

        let patients = service.patients();
        assert_eq!(patients[0].ordinations().len(), 1);
        assert_eq!(service.as_needed_ordinations().len(), 1);
    }

    #[test]
    fn rejects_negative_dose() {
        let (service, patient_id, medication_id) = service_with_one_patient();

        let err = service
            .create_as_needed(
                patient_id,
                medication_id,
                -1.0,
                date(2024, 11, 1),
                date(2024, 11, 5),
            )
            .expect_err("negative dose rejected");

        assert!(matches!(err, OrdinationError::NegativeDose));
    }

    #[test]
    fn rejects_zero_dose_for_every_variant() {
        let (service, patient_id, medication_id) = service_with_one_patient();
        let (start, end) = (date(2024, 11, 1), date(2024, 11, 5));

        let err = service
            .create_as_needed(patient_id, medication_id, 0.0, start, end)
            .expect_err("zero as-needed dose rejected");
        assert!(matches!(err, OrdinationError::UnspecifiedDose));

        let err = service
            .create_fixed_daily(patient_id, medication_id, 0.0, 0.0, 0.0, 0.0, start, end)
            .expect_err("zero fixed-daily dose rejected");
        assert!(matches!(err, OrdinationError::UnspecifiedDose));

        let err = service
            .create_variable_daily(patient_id, medication_id, Vec::new(), start, end)
            .expect_err("empty variable-daily dose rejected");
        assert!(matches!(err, OrdinationError::UnspecifiedDose));
    }

    #[test]
    fn rejects_dose_above_recommended_ceiling() {
        let (service, patient_id, medication_id) = service_with_one_patient();

        let err = service
            .create_as_needed(
                patient_id,
                medication_id,
                96.0,
                date(2024, 11, 1),
                date(2024, 11, 5),
            )
            .expect_err("excessive dose rejected");

        match err {
            OrdinationError::ExceedsRecommendedDose {
                requested,
                recommended,
            } => {
                assert_eq!(requested, 96.0);
                assert!((recommended - 95.1).abs() < 1e-9);
            }
            other => panic!("expected ExceedsRecommendedDose, got {other:?}"),
        }
    }

    #[test]
    fn accepts_dose_exactly_at_the_ceiling() {
        let (service, patient_id, medication_id) = service_with_one_patient();
        let recommended = service
            .recommended_daily_dose(patient_id, medication_id)
            .expect("both ids exist");

        let result = service.create_as_needed(
            patient_id,
            medication_id,
            recommended,
            date(2024, 11, 1),
            date(2024, 11, 5),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn rejects_end_before_start_on_every_variant() {
        let (service, patient_id, medication_id) = service_with_one_patient();
        let (start, end) = (date(2024, 11, 5), date(2024, 11, 1));

        let err = service
            .create_as_needed(patient_id, medication_id, 1.0, start, end)
            .expect_err("as-needed date order rejected");
        assert!(matches!(err, OrdinationError::EndBeforeStart { .. }));

        let err = service
            .create_fixed_daily(patient_id, medication_id, 1.0, 0.0, 0.0, 0.0, start, end)
            .expect_err("fixed-daily date order rejected");
        assert!(matches!(err, OrdinationError::EndBeforeStart { .. }));

        let err = service
            .create_variable_daily(
                patient_id,
                medication_id,
                vec![Dose::new(time(8, 0), 1.0)],
                start,
                end,
            )
            .expect_err("variable-daily date order rejected");
        assert!(matches!(err, OrdinationError::EndBeforeStart { .. }));
    }

    #[test]
    fn rejects_unknown_patient_and_medication() {
        let (service, patient_id, medication_id) = service_with_one_patient();
        let (start, end) = (date(2024, 11, 1), date(2024, 11, 5));

        let err = service
            .create_as_needed(PatientId::new(99), medication_id, 1.0, start, end)
            .expect_err("unknown patient rejected");
        assert!(matches!(err, OrdinationError::PatientNotFound(_)));
        assert!(err.is_not_found());

        let err = service
            .create_variable_daily(
                patient_id,
                MedicationId::new(99),
                vec![Dose::new(time(8, 0), 1.0)],
                start,
                end,
            )
            .expect_err("unknown medication rejected");
        assert!(matches!(err, OrdinationError::MedicationNotFound(_)));
    }

    #[test]
    fn failed_validation_leaves_no_partial_write() {
        let (service, patient_id, medication_id) = service_with_one_patient();

        let _ = service.create_as_needed(
            patient_id,
            medication_id,
            -1.0,
            date(2024, 11, 1),
            date(2024, 11, 5),
        );
        let _ = service.create_fixed_daily(
            patient_id,
            medication_id,
            50.0,
            50.0,
            0.0,
            0.0,
            date(2024, 11, 1),
            date(2024, 11, 5),
        );

        assert!(service.patients()[0].ordinations().is_empty());
    }

    #[test]
    fn creates_fixed_daily_with_slot_sum_dose() {
        let (service, patient_id, medication_id) = service_with_one_patient();

        let ordination = service
            .create_fixed_daily(
                patient_id,
                medication_id,
                2.0,
                2.0,
                1.0,
                0.0,
                date(2024, 11, 22),
                date(2024, 11, 22),
            )
            .expect("creation succeeds");

        assert_eq!(ordination.daily_dose(), 5.0);
        assert_eq!(ordination.total_dose(), 5.0);
        assert_eq!(service.fixed_daily_ordinations().len(), 1);
    }

    #[test]
    fn creates_variable_daily_from_dose_slots() {
        let (service, patient_id, medication_id) = service_with_one_patient();

        let ordination = service
            .create_variable_daily(
                patient_id,
                medication_id,
                vec![Dose::new(time(8, 0), 0.5), Dose::new(time(20, 0), 1.5)],
                date(2024, 11, 23),
                date(2024, 11, 24),
            )
            .expect("creation succeeds");

        assert_eq!(ordination.daily_dose(), 2.0);
        assert_eq!(ordination.total_dose(), 4.0);
        assert_eq!(service.variable_daily_ordinations().len(), 1);
    }

    #[test]
    fn records_administration_within_validity_period() {
        let (service, patient_id, medication_id) = service_with_one_patient();
        let ordination = service
            .create_as_needed(
                patient_id,
                medication_id,
                2.0,
                date(2024, 11, 1),
                date(2024, 11, 5),
            )
            .expect("creation succeeds");

        let given_at = date(2024, 11, 3).and_hms_opt(9, 30, 0).expect("valid time");
        let outcome = service.record_administration(ordination.id(), given_at);

        assert!(outcome.is_recorded());
        let patients = service.patients();
        let stored = &patients[0].ordinations()[0];
        assert_eq!(stored.times_given(), 1);
        assert_eq!(stored.total_dose(), 2.0);
    }

    #[test]
    fn rejects_administration_outside_validity_period() {
        let (service, patient_id, medication_id) = service_with_one_patient();
        let ordination = service
            .create_as_needed(
                patient_id,
                medication_id,
                2.0,
                date(2024, 11, 1),
                date(2024, 11, 5),
            )
            .expect("creation succeeds");

        let given_at = date(2024, 11, 6).and_hms_opt(9, 0, 0).expect("valid time");
        let outcome = service.record_administration(ordination.id(), given_at);

        assert!(matches!(
            outcome,
            AdministrationOutcome::OutsideValidityPeriod { .. }
        ));
        assert_eq!(service.patients()[0].ordinations()[0].times_given(), 0);
    }

    #[test]
    fn administration_on_boundary_dates_is_recorded() {
        let (service, patient_id, medication_id) = service_with_one_patient();
        let ordination = service
            .create_as_needed(
                patient_id,
                medication_id,
                2.0,
                date(2024, 11, 1),
                date(2024, 11, 5),
            )
            .expect("creation succeeds");

        let on_start = date(2024, 11, 1).and_hms_opt(0, 0, 0).expect("valid time");
        let on_end = date(2024, 11, 5).and_hms_opt(23, 59, 0).expect("valid time");
        assert!(service.record_administration(ordination.id(), on_start).is_recorded());
        assert!(service.record_administration(ordination.id(), on_end).is_recorded());
        assert_eq!(service.patients()[0].ordinations()[0].times_given(), 2);
    }

    #[test]
    fn unknown_ordination_yields_descriptive_outcome() {
        let (service, _, _) = service_with_one_patient();

        let given_at = date(2024, 11, 3).and_hms_opt(9, 0, 0).expect("valid time");
        let outcome = service.record_administration(OrdinationId::new(404), given_at);

        assert!(matches!(
            outcome,
            AdministrationOutcome::UnknownOrdination { .. }
        ));
        assert!(outcome.to_string().contains("404"));
    }

    #[test]
    fn daily_variants_acknowledge_without_recording() {
        let (service, patient_id, medication_id) = service_with_one_patient();
        let ordination = service
            .create_fixed_daily(
                patient_id,
                medication_id,
                1.0,
                0.0,
                0.0,
                0.0,
                date(2024, 11, 1),
                date(2024, 11, 5),
            )
            .expect("creation succeeds");

        let given_at = date(2024, 11, 2).and_hms_opt(8, 0, 0).expect("valid time");
        let outcome = service.record_administration(ordination.id(), given_at);

        assert!(outcome.is_recorded());
        assert_eq!(service.patients()[0].ordinations()[0].times_given(), 0);
    }

    #[test]
    fn recommended_dose_resolves_ids_before_computing() {
        let (service, patient_id, medication_id) = service_with_one_patient();

        let dose = service
            .recommended_daily_dose(patient_id, medication_id)
            .expect("both ids exist");
        assert!((dose - 95.1).abs() < 1e-9);

        let err = service
            .recommended_daily_dose(patient_id, MedicationId::new(9))
            .expect_err("dangling medication id");
        assert!(matches!(err, OrdinationError::MedicationNotFound(_)));
    }
}
