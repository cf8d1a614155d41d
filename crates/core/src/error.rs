//! Error types for the ordination core.

use chrono::NaiveDate;

use crate::medication::MedicationId;
use crate::ordination::OrdinationId;
use crate::patient::PatientId;

/// Errors produced by ordination creation and dose validation.
///
/// Lookup failures (`*NotFound`) and dose/date validation failures abort the
/// operation before anything is written; none of these variants leaves a
/// partial mutation behind. An administration date outside an ordination's
/// validity window is deliberately *not* represented here — it is an expected
/// outcome reported through
/// [`AdministrationOutcome`](crate::ordination::AdministrationOutcome).
#[derive(Debug, thiserror::Error)]
pub enum OrdinationError {
    #[error("patient {0} does not exist")]
    PatientNotFound(PatientId),
    #[error("medication {0} does not exist")]
    MedicationNotFound(MedicationId),
    #[error("ordination {0} does not exist")]
    OrdinationNotFound(OrdinationId),
    #[error("dose amount cannot be negative")]
    NegativeDose,
    #[error("dose amount must be specified")]
    UnspecifiedDose,
    #[error("requested daily dose {requested} exceeds the recommended daily dose {recommended}")]
    ExceedsRecommendedDose { requested: f64, recommended: f64 },
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ordination_types::TextError),
}

impl OrdinationError {
    /// True for errors caused by a dangling identifier rather than by the
    /// request payload itself. API layers map these to 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OrdinationError::PatientNotFound(_)
                | OrdinationError::MedicationNotFound(_)
                | OrdinationError::OrdinationNotFound(_)
        )
    }
}

pub type OrdinationResult<T> = std::result::Result<T, OrdinationError>;
