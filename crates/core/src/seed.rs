//! Demo data seeding.
//!
//! Fills an empty store with the demo patients, medications and ordinations
//! used by the test harness and development servers. Seeding writes straight
//! into the store and deliberately bypasses dose validation: some of the
//! seeded ordinations exceed their recommended ceiling on purpose, so that
//! validation failures can be demonstrated against live data.

use chrono::{NaiveDate, NaiveTime};
use ordination_types::NonEmptyText;

use crate::error::OrdinationResult;
use crate::ordination::{Dose, Ordination, Schedule};
use crate::store::OrdinationStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("literal seed date")
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("literal seed time")
}

/// Seeds the demo data set if the store is still empty.
///
/// Idempotent: calling it against a non-empty store does nothing.
///
/// # Errors
///
/// Returns an error only if one of the seeded display fields fails
/// validation, which would be a programming mistake in the seed data itself.
pub fn seed_demo_data(store: &OrdinationStore) -> OrdinationResult<()> {
    if !store.is_empty() {
        tracing::debug!("store already populated, skipping seed");
        return Ok(());
    }

    let patients = [
        store.add_patient("121256-0512", NonEmptyText::new("Jane Jensen")?, 63.4),
        store.add_patient("070985-1153", NonEmptyText::new("Finn Madsen")?, 83.2),
        store.add_patient("050972-1233", NonEmptyText::new("Hans Jørgensen")?, 89.4),
        store.add_patient("011064-1522", NonEmptyText::new("Ulla Nielsen")?, 59.9),
        store.add_patient("123456-1234", NonEmptyText::new("Ib Hansen")?, 87.7),
    ];

    let medications = [
        store.add_medication(
            NonEmptyText::new("Acetylsalicylsyre")?,
            NonEmptyText::new("Styk")?,
            0.1,
            0.15,
            0.16,
        ),
        store.add_medication(
            NonEmptyText::new("Paracetamol")?,
            NonEmptyText::new("Ml")?,
            1.0,
            1.5,
            2.0,
        ),
        store.add_medication(
            NonEmptyText::new("Fucidin")?,
            NonEmptyText::new("Styk")?,
            0.025,
            0.025,
            0.025,
        ),
        store.add_medication(
            NonEmptyText::new("Methotrexat")?,
            NonEmptyText::new("Styk")?,
            0.01,
            0.015,
            0.02,
        ),
        store.add_medication(
            NonEmptyText::new("Prednisolon")?,
            NonEmptyText::new("Styk")?,
            0.1,
            0.15,
            0.2,
        ),
    ];

    let as_needed = |units: f64| Schedule::AsNeeded {
        units_per_administration: units,
        administrations: Vec::new(),
    };

    // (owner, medication, start, end, schedule)
    let seeded = [
        (
            patients[0].id(),
            medications[1].id(),
            date(2024, 11, 1),
            date(2024, 11, 12),
            as_needed(123.0),
        ),
        (
            patients[0].id(),
            medications[0].id(),
            date(2024, 12, 12),
            date(2024, 12, 14),
            as_needed(3.0),
        ),
        (
            patients[2].id(),
            medications[2].id(),
            date(2024, 11, 20),
            date(2024, 11, 25),
            as_needed(5.0),
        ),
        (
            patients[3].id(),
            medications[1].id(),
            date(2024, 11, 1),
            date(2024, 11, 12),
            as_needed(123.0),
        ),
        (
            patients[1].id(),
            medications[1].id(),
            date(2024, 11, 10),
            date(2024, 11, 12),
            Schedule::FixedDaily {
                morning: 2.0,
                noon: 0.0,
                evening: 1.0,
                night: 0.0,
            },
        ),
        (
            patients[1].id(),
            medications[2].id(),
            date(2024, 11, 23),
            date(2024, 11, 24),
            Schedule::VariableDaily {
                doses: vec![
                    Dose::new(time(12, 0), 0.5),
                    Dose::new(time(12, 40), 1.0),
                    Dose::new(time(16, 0), 2.5),
                    Dose::new(time(18, 45), 3.0),
                ],
            },
        ),
    ];

    store.with(|inner| {
        for (patient_id, medication_id, start, end, schedule) in seeded {
            let id = inner.allocate_ordination_id();
            let ordination = Ordination::new(id, medication_id, start, end, schedule);
            if let Some(patient) = inner.patient_mut(patient_id) {
                patient.attach_ordination(ordination);
            }
        }
    });

    tracing::info!(
        patients = patients.len(),
        medications = medications.len(),
        "seeded demo data"
    );
    Ok(())
}
