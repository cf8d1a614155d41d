//! In-memory store for patients, medications and their ordinations.
//!
//! This is the persistence collaborator of the core, realised in-process:
//! two keyed tables with sequential identity counters, guarded by one mutex.
//! Every service operation runs as a single closure under that mutex, which
//! makes each load-validate-mutate sequence atomic with respect to other
//! callers.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use ordination_types::NonEmptyText;

use crate::medication::{Medication, MedicationId};
use crate::ordination::{Ordination, OrdinationId};
use crate::patient::{Patient, PatientId};

#[derive(Default)]
pub(crate) struct StoreInner {
    patients: BTreeMap<PatientId, Patient>,
    medications: BTreeMap<MedicationId, Medication>,
    next_patient_id: u64,
    next_medication_id: u64,
    next_ordination_id: u64,
}

impl StoreInner {
    pub(crate) fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.get(&id)
    }

    pub(crate) fn patient_mut(&mut self, id: PatientId) -> Option<&mut Patient> {
        self.patients.get_mut(&id)
    }

    pub(crate) fn medication(&self, id: MedicationId) -> Option<&Medication> {
        self.medications.get(&id)
    }

    /// Ordinations are owned by patients, so lookup by id walks the registry.
    pub(crate) fn ordination_mut(&mut self, id: OrdinationId) -> Option<&mut Ordination> {
        self.patients.values_mut().find_map(|p| p.ordination_mut(id))
    }

    pub(crate) fn allocate_ordination_id(&mut self) -> OrdinationId {
        self.next_ordination_id += 1;
        OrdinationId::new(self.next_ordination_id)
    }
}

/// Shared, mutex-guarded store.
#[derive(Default)]
pub struct OrdinationStore {
    inner: Mutex<StoreInner>,
}

impl OrdinationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // A poisoned lock only means another caller panicked mid-operation;
        // the tables themselves are still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the tables.
    pub(crate) fn with<T>(&self, f: impl FnOnce(&mut StoreInner) -> T) -> T {
        f(&mut self.lock())
    }

    /// True when neither patients nor medications have been stored yet.
    pub fn is_empty(&self) -> bool {
        let inner = self.lock();
        inner.patients.is_empty() && inner.medications.is_empty()
    }

    /// Registers a patient and returns the stored record.
    pub fn add_patient(
        &self,
        national_id: impl Into<String>,
        name: NonEmptyText,
        weight_kg: f64,
    ) -> Patient {
        let mut inner = self.lock();
        inner.next_patient_id += 1;
        let patient = Patient::new(
            PatientId::new(inner.next_patient_id),
            national_id.into(),
            name,
            weight_kg,
        );
        inner.patients.insert(patient.id(), patient.clone());
        patient
    }

    /// Adds a medication to the catalogue and returns the stored record.
    pub fn add_medication(
        &self,
        name: NonEmptyText,
        unit: NonEmptyText,
        rate_per_kg_low: f64,
        rate_per_kg_normal: f64,
        rate_per_kg_high: f64,
    ) -> Medication {
        let mut inner = self.lock();
        inner.next_medication_id += 1;
        let medication = Medication::new(
            MedicationId::new(inner.next_medication_id),
            name,
            unit,
            rate_per_kg_low,
            rate_per_kg_normal,
            rate_per_kg_high,
        );
        inner.medications.insert(medication.id(), medication.clone());
        medication
    }

    pub fn patient(&self, id: PatientId) -> Option<Patient> {
        self.lock().patients.get(&id).cloned()
    }

    pub fn medication(&self, id: MedicationId) -> Option<Medication> {
        self.lock().medications.get(&id).cloned()
    }

    /// All patients, each with their owned ordinations.
    pub fn patients(&self) -> Vec<Patient> {
        self.lock().patients.values().cloned().collect()
    }

    pub fn medications(&self) -> Vec<Medication> {
        self.lock().medications.values().cloned().collect()
    }

    /// Removes a patient. The patient's ordinations go with it.
    pub fn remove_patient(&self, id: PatientId) -> Option<Patient> {
        self.lock().patients.remove(&id)
    }
}
