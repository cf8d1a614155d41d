//! The ordination (prescription) hierarchy and its dose algorithms.
//!
//! An ordination covers an inclusive treatment period and carries one of
//! three schedules: as-needed ("PN"), fixed daily ("DagligFast") or variable
//! daily ("DagligSkæv"). The schedule is a closed sum type so that the dose
//! algorithms stay exhaustively matched at compile time.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::medication::MedicationId;

/// Identifier of an ordination.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OrdinationId(u64);

impl OrdinationId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrdinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single dose slot of a variable-daily schedule: a time of day and the
/// quantity given at that time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dose {
    pub time: NaiveTime,
    pub quantity: f64,
}

impl Dose {
    pub fn new(time: NaiveTime, quantity: f64) -> Self {
        Self { time, quantity }
    }
}

/// The variant-specific part of an ordination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Schedule {
    /// Given irregularly, on demand. Each recorded administration hands out
    /// `units_per_administration` units.
    AsNeeded {
        units_per_administration: f64,
        administrations: Vec<NaiveDateTime>,
    },
    /// Given every day at four fixed times.
    FixedDaily {
        morning: f64,
        noon: f64,
        evening: f64,
        night: f64,
    },
    /// Given at caller-defined times each day; quantity may vary per slot.
    VariableDaily { doses: Vec<Dose> },
}

impl Schedule {
    /// The aggregate daily dose a creation request asks for, as validated
    /// against the recommended ceiling.
    ///
    /// For the as-needed schedule this is the units per administration (the
    /// caller may not request more per hand-out than a whole day's ceiling);
    /// for the daily schedules it is the sum of the slot quantities.
    pub fn requested_daily_dose(&self) -> f64 {
        match self {
            Schedule::AsNeeded {
                units_per_administration,
                ..
            } => *units_per_administration,
            Schedule::FixedDaily {
                morning,
                noon,
                evening,
                night,
            } => morning + noon + evening + night,
            Schedule::VariableDaily { doses } => doses.iter().map(|d| d.quantity).sum(),
        }
    }
}

/// A prescription attached to exactly one patient.
///
/// Created once through the ordination service and never reassigned. The only
/// mutation after creation is appending administration events to an as-needed
/// schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ordination {
    id: OrdinationId,
    medication_id: MedicationId,
    start: NaiveDate,
    end: NaiveDate,
    schedule: Schedule,
}

impl Ordination {
    pub fn new(
        id: OrdinationId,
        medication_id: MedicationId,
        start: NaiveDate,
        end: NaiveDate,
        schedule: Schedule,
    ) -> Self {
        Self {
            id,
            medication_id,
            start,
            end,
            schedule,
        }
    }

    pub fn id(&self) -> OrdinationId {
        self.id
    }

    pub fn medication_id(&self) -> MedicationId {
        self.medication_id
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Stable tag distinguishing the three variants.
    pub fn type_name(&self) -> &'static str {
        match self.schedule {
            Schedule::AsNeeded { .. } => "PN",
            Schedule::FixedDaily { .. } => "DagligFast",
            Schedule::VariableDaily { .. } => "DagligSkæv",
        }
    }

    /// Number of days in the treatment period, counting both endpoints.
    pub fn treatment_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days() + 1
    }

    /// True when `date` lies within the inclusive validity period.
    pub fn in_validity_period(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Nominal or observed units per day.
    ///
    /// Daily schedules return the sum of their slot quantities. The as-needed
    /// schedule returns the average over the inclusive span between the
    /// earliest and latest recorded administration dates, or 0 when nothing
    /// has been recorded yet.
    pub fn daily_dose(&self) -> f64 {
        match &self.schedule {
            Schedule::AsNeeded { administrations, .. } => {
                let Some(first) = administrations.first() else {
                    return 0.0;
                };
                let mut earliest = first.date();
                let mut latest = first.date();
                for given in administrations {
                    let date = given.date();
                    if date < earliest {
                        earliest = date;
                    }
                    if date > latest {
                        latest = date;
                    }
                }
                let span_days = latest.signed_duration_since(earliest).num_days() + 1;
                self.total_dose() / span_days as f64
            }
            Schedule::FixedDaily {
                morning,
                noon,
                evening,
                night,
            } => morning + noon + evening + night,
            Schedule::VariableDaily { doses } => doses.iter().map(|d| d.quantity).sum(),
        }
    }

    /// Total units over the whole treatment.
    ///
    /// Daily schedules multiply the daily dose by the inclusive day count;
    /// the as-needed schedule counts what was actually handed out.
    pub fn total_dose(&self) -> f64 {
        match &self.schedule {
            Schedule::AsNeeded {
                units_per_administration,
                administrations,
            } => administrations.len() as f64 * units_per_administration,
            Schedule::FixedDaily { .. } | Schedule::VariableDaily { .. } => {
                self.daily_dose() * self.treatment_days() as f64
            }
        }
    }

    /// Number of administrations recorded against an as-needed schedule.
    /// Zero for the daily schedules, which do not record administrations.
    pub fn times_given(&self) -> usize {
        match &self.schedule {
            Schedule::AsNeeded { administrations, .. } => administrations.len(),
            _ => 0,
        }
    }

    /// Appends an administration event to an as-needed schedule.
    ///
    /// Returns `true` when an event was stored. Daily schedules have no
    /// administration list, so recording against them is a no-op returning
    /// `false`. Callers are expected to have checked the validity period
    /// first; this method does not.
    pub(crate) fn note_administration(&mut self, given_at: NaiveDateTime) -> bool {
        match &mut self.schedule {
            Schedule::AsNeeded { administrations, .. } => {
                administrations.push(given_at);
                true
            }
            _ => false,
        }
    }
}

/// Result of asking the recorder to mark an ordination as administered.
///
/// These are expected outcomes communicated back as values; only `Recorded`
/// changed anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AdministrationOutcome {
    /// The date fell inside the validity period. For an as-needed ordination
    /// an administration event was appended; for the daily variants nothing
    /// is stored beyond the acknowledgement.
    Recorded {
        ordination_id: OrdinationId,
        given_at: NaiveDateTime,
    },
    /// The date fell outside `[start, end]`; nothing was recorded.
    OutsideValidityPeriod {
        given_at: NaiveDateTime,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// No ordination with the given id exists.
    UnknownOrdination { ordination_id: OrdinationId },
}

impl AdministrationOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, AdministrationOutcome::Recorded { .. })
    }
}

impl std::fmt::Display for AdministrationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdministrationOutcome::Recorded {
                ordination_id,
                given_at,
            } => write!(
                f,
                "ordination {} was marked as administered on {}",
                ordination_id, given_at
            ),
            AdministrationOutcome::OutsideValidityPeriod {
                given_at,
                start,
                end,
            } => write!(
                f,
                "date {} is outside the ordination's validity period ({} to {})",
                given_at, start, end
            ),
            AdministrationOutcome::UnknownOrdination { ordination_id } => {
                write!(f, "ordination {} does not exist", ordination_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    fn fixed_daily(
        start: NaiveDate,
        end: NaiveDate,
        morning: f64,
        noon: f64,
        evening: f64,
        night: f64,
    ) -> Ordination {
        Ordination::new(
            OrdinationId::new(1),
            MedicationId::new(1),
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

    #[test]
    fn type_names_are_stable() {
        let pn = Ordination::new(
            OrdinationId::new(1),
            MedicationId::new(1),
            date(2024, 11, 1),
            date(2024, 11, 12),
            Schedule::AsNeeded {
                units_per_administration: 2.0,
                administrations: Vec::new(),
            },
        );
        let skaev = Ordination::new(
            OrdinationId::new(2),
            MedicationId::new(1),
            date(2024, 11, 1),
            date(2024, 11, 12),
            Schedule::VariableDaily { doses: Vec::new() },
        );
        let fast = fixed_daily(date(2024, 11, 1), date(2024, 11, 12), 1.0, 0.0, 0.0, 0.0);

        assert_eq!(pn.type_name(), "PN");
        assert_eq!(fast.type_name(), "DagligFast");
        assert_eq!(skaev.type_name(), "DagligSkæv");
    }

    #[test]
    fn treatment_days_counts_both_endpoints() {
        let one_day = fixed_daily(date(2024, 11, 22), date(2024, 11, 22), 1.0, 0.0, 0.0, 0.0);
        let three_days = fixed_daily(date(2024, 11, 10), date(2024, 11, 12), 1.0, 0.0, 0.0, 0.0);

        assert_eq!(one_day.treatment_days(), 1);
        assert_eq!(three_days.treatment_days(), 3);
    }

    #[test]
    fn fixed_daily_single_day_doses() {
        let ordination = fixed_daily(date(2024, 11, 22), date(2024, 11, 22), 2.0, 2.0, 1.0, 0.0);

        assert_eq!(ordination.daily_dose(), 5.0);
        assert_eq!(ordination.total_dose(), 5.0);
    }

    #[test]
    fn fixed_daily_total_is_daily_times_inclusive_days() {
        let ordination = fixed_daily(date(2024, 11, 10), date(2024, 11, 12), 2.0, 0.0, 1.0, 0.0);

        assert_eq!(ordination.daily_dose(), 3.0);
        assert_eq!(ordination.total_dose(), 9.0);
    }

    #[test]
    fn variable_daily_sums_slot_quantities() {
        let ordination = Ordination::new(
            OrdinationId::new(5),
            MedicationId::new(3),
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
        );

        assert_eq!(ordination.daily_dose(), 7.0);
        assert_eq!(ordination.total_dose(), 14.0);
    }

    #[test]
    fn variable_daily_with_single_nonzero_slot() {
        let ordination = Ordination::new(
            OrdinationId::new(6),
            MedicationId::new(3),
            date(2024, 11, 23),
            date(2024, 11, 23),
            Schedule::VariableDaily {
                doses: vec![
                    Dose::new(time(8, 0), 0.0),
                    Dose::new(time(12, 0), 0.0),
                    Dose::new(time(20, 0), 1.5),
                ],
            },
        );

        assert_eq!(ordination.daily_dose(), 1.5);
    }

    #[test]
    fn as_needed_daily_dose_is_zero_without_administrations() {
        let ordination = Ordination::new(
            OrdinationId::new(7),
            MedicationId::new(2),
            date(2024, 11, 1),
            date(2024, 11, 12),
            Schedule::AsNeeded {
                units_per_administration: 2.0,
                administrations: Vec::new(),
            },
        );

        assert_eq!(ordination.daily_dose(), 0.0);
        assert_eq!(ordination.total_dose(), 0.0);
        assert_eq!(ordination.times_given(), 0);
    }

    #[test]
    fn as_needed_total_counts_administrations() {
        let mut ordination = Ordination::new(
            OrdinationId::new(7),
            MedicationId::new(2),
            date(2024, 11, 1),
            date(2024, 11, 12),
            Schedule::AsNeeded {
                units_per_administration: 2.5,
                administrations: Vec::new(),
            },
        );

        assert!(ordination.note_administration(date(2024, 11, 2).and_hms_opt(9, 0, 0).unwrap()));
        assert!(ordination.note_administration(date(2024, 11, 2).and_hms_opt(21, 0, 0).unwrap()));
        assert!(ordination.note_administration(date(2024, 11, 4).and_hms_opt(9, 0, 0).unwrap()));

        assert_eq!(ordination.times_given(), 3);
        assert_eq!(ordination.total_dose(), 7.5);
    }

    #[test]
    fn as_needed_daily_dose_averages_over_observed_span() {
        let mut ordination = Ordination::new(
            OrdinationId::new(7),
            MedicationId::new(2),
            date(2024, 11, 1),
            date(2024, 11, 12),
            Schedule::AsNeeded {
                units_per_administration: 2.0,
                administrations: Vec::new(),
            },
        );

        // Administrations on day 1 and day 3: inclusive span of 3 days.
        ordination.note_administration(date(2024, 11, 1).and_hms_opt(8, 0, 0).unwrap());
        ordination.note_administration(date(2024, 11, 3).and_hms_opt(8, 0, 0).unwrap());

        assert_eq!(ordination.total_dose(), 4.0);
        assert!((ordination.daily_dose() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn as_needed_span_is_positive_regardless_of_recording_order() {
        let mut ordination = Ordination::new(
            OrdinationId::new(7),
            MedicationId::new(2),
            date(2024, 11, 1),
            date(2024, 11, 12),
            Schedule::AsNeeded {
                units_per_administration: 1.0,
                administrations: Vec::new(),
            },
        );

        // Latest date recorded first; the span must still come out as
        // latest minus earliest plus one, never negative.
        ordination.note_administration(date(2024, 11, 10).and_hms_opt(8, 0, 0).unwrap());
        ordination.note_administration(date(2024, 11, 6).and_hms_opt(8, 0, 0).unwrap());

        assert!(ordination.daily_dose() > 0.0);
        assert!((ordination.daily_dose() - 2.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn as_needed_daily_dose_single_day_equals_total() {
        let mut ordination = Ordination::new(
            OrdinationId::new(7),
            MedicationId::new(2),
            date(2024, 11, 1),
            date(2024, 11, 12),
            Schedule::AsNeeded {
                units_per_administration: 3.0,
                administrations: Vec::new(),
            },
        );

        ordination.note_administration(date(2024, 11, 5).and_hms_opt(8, 0, 0).unwrap());
        ordination.note_administration(date(2024, 11, 5).and_hms_opt(20, 0, 0).unwrap());

        assert_eq!(ordination.daily_dose(), 6.0);
    }

    #[test]
    fn note_administration_is_a_no_op_for_daily_schedules() {
        let mut ordination = fixed_daily(date(2024, 11, 10), date(2024, 11, 12), 2.0, 0.0, 1.0, 0.0);

        let stored =
            ordination.note_administration(date(2024, 11, 11).and_hms_opt(9, 0, 0).unwrap());

        assert!(!stored);
        assert_eq!(ordination.times_given(), 0);
    }

    #[test]
    fn validity_period_is_inclusive() {
        let ordination = fixed_daily(date(2024, 11, 10), date(2024, 11, 12), 1.0, 0.0, 0.0, 0.0);

        assert!(ordination.in_validity_period(date(2024, 11, 10)));
        assert!(ordination.in_validity_period(date(2024, 11, 12)));
        assert!(!ordination.in_validity_period(date(2024, 11, 9)));
        assert!(!ordination.in_validity_period(date(2024, 11, 13)));
    }

    #[test]
    fn outcome_messages_mention_the_ordination() {
        let outcome = AdministrationOutcome::UnknownOrdination {
            ordination_id: OrdinationId::new(42),
        };
        assert!(outcome.to_string().contains("42"));
        assert!(!outcome.is_recorded());
    }
}
