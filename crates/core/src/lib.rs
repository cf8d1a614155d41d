//! # Ordination Core
//!
//! Core business logic for the ordination dose-validation system:
//! - the medication catalogue and patient registry
//! - the polymorphic ordination hierarchy and its dose algorithms
//! - the weight-tiered recommended-dose calculator
//! - the creation service with its validation invariants
//! - the administration recorder
//!
//! **No API concerns**: HTTP routing, serialization formats and server
//! wiring belong in `api-rest` and `api-shared`.

pub mod dosage;
pub mod error;
pub mod medication;
pub mod ordination;
pub mod patient;
pub mod seed;
pub mod service;
pub mod store;

pub use error::{OrdinationError, OrdinationResult};
pub use medication::{Medication, MedicationId};
pub use ordination::{AdministrationOutcome, Dose, Ordination, OrdinationId, Schedule};
pub use patient::{Patient, PatientId};
pub use seed::seed_demo_data;
pub use service::OrdinationService;
pub use store::OrdinationStore;
