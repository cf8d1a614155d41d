//! # API Shared
//!
//! Types shared between API surfaces and their clients:
//! - request/response DTOs with OpenAPI schemas
//! - the health check service
//!
//! DTOs are plain serde structs; mapping them to and from the core domain
//! types is the API layer's job.

pub mod dto;
pub mod health;

pub use health::HealthService;
