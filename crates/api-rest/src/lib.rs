//! # API REST
//!
//! REST API for the ordination dose-validation service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status mapping)
//!
//! Uses `api-shared` for the wire DTOs and `ordination-core` for the
//! domain logic; this crate only maps between the two.

#![warn(rust_2018_idioms)]

pub mod convert;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::dto;
use api_shared::HealthService;
use ordination_core::{
    Dose, MedicationId, OrdinationError, OrdinationId, OrdinationService, PatientId,
};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    service: OrdinationService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_patients,
        list_medications,
        list_pn_ordinations,
        list_daily_fixed_ordinations,
        list_daily_variable_ordinations,
        create_pn_ordination,
        create_daily_fixed_ordination,
        create_daily_variable_ordination,
        record_administration,
        recommended_dose,
    ),
    components(schemas(
        dto::HealthRes,
        dto::ErrorRes,
        dto::MedicationRes,
        dto::ListMedicationsRes,
        dto::OrdinationSummary,
        dto::PatientRes,
        dto::ListPatientsRes,
        dto::DoseSlot,
        dto::PnOrdinationRes,
        dto::ListPnOrdinationsRes,
        dto::DailyFixedOrdinationRes,
        dto::ListDailyFixedOrdinationsRes,
        dto::DailyVariableOrdinationRes,
        dto::ListDailyVariableOrdinationsRes,
        dto::CreatePnOrdinationReq,
        dto::CreateDailyFixedOrdinationReq,
        dto::CreateDailyVariableOrdinationReq,
        dto::RecordAdministrationReq,
        dto::AdministrationRes,
        dto::RecommendedDoseRes,
    ))
)]
struct ApiDoc;

type ErrorResponse = (StatusCode, Json<dto::ErrorRes>);

/// Maps a core error onto an HTTP response: dangling identifiers become 404,
/// every validation failure becomes 400 with the error's display message.
fn error_response(err: OrdinationError) -> ErrorResponse {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    (
        status,
        Json(dto::ErrorRes {
            error: err.to_string(),
        }),
    )
}

/// Builds the REST router over the given service.
///
/// Mounts all ordination endpoints plus Swagger UI at `/swagger-ui` with the
/// OpenAPI document at `/api-docs/openapi.json`, and a permissive CORS layer.
pub fn app(service: OrdinationService) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/health", get(health))
        .route("/patients", get(list_patients))
        .route("/medications", get(list_medications))
        .route("/ordinations/pn", get(list_pn_ordinations))
        .route("/ordinations/pn", post(create_pn_ordination))
        .route("/ordinations/daily-fixed", get(list_daily_fixed_ordinations))
        .route("/ordinations/daily-fixed", post(create_daily_fixed_ordination))
        .route(
            "/ordinations/daily-variable",
            get(list_daily_variable_ordinations),
        )
        .route(
            "/ordinations/daily-variable",
            post(create_daily_variable_ordination),
        )
        .route("/ordinations/:id/administrations", post(record_administration))
        .route(
            "/patients/:patient_id/recommended-dose/:medication_id",
            get(recommended_dose),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = dto::HealthRes)
    )
)]
/// Health check endpoint for the REST API.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<dto::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "All patients with their ordinations", body = dto::ListPatientsRes)
    )
)]
/// Lists all patients together with the ordinations they own.
#[axum::debug_handler]
async fn list_patients(State(state): State<AppState>) -> Json<dto::ListPatientsRes> {
    let patients = state
        .service
        .patients()
        .iter()
        .map(convert::patient_res)
        .collect();
    Json(dto::ListPatientsRes { patients })
}

#[utoipa::path(
    get,
    path = "/medications",
    responses(
        (status = 200, description = "The medication catalogue", body = dto::ListMedicationsRes)
    )
)]
/// Lists the medication catalogue.
#[axum::debug_handler]
async fn list_medications(State(state): State<AppState>) -> Json<dto::ListMedicationsRes> {
    let medications = state
        .service
        .medications()
        .iter()
        .map(convert::medication_res)
        .collect();
    Json(dto::ListMedicationsRes { medications })
}

#[utoipa::path(
    get,
    path = "/ordinations/pn",
    responses(
        (status = 200, description = "All as-needed ordinations", body = dto::ListPnOrdinationsRes)
    )
)]
/// Lists all as-needed ("PN") ordinations across all patients.
#[axum::debug_handler]
async fn list_pn_ordinations(State(state): State<AppState>) -> Json<dto::ListPnOrdinationsRes> {
    let ordinations = state
        .service
        .as_needed_ordinations()
        .iter()
        .filter_map(convert::pn_res)
        .collect();
    Json(dto::ListPnOrdinationsRes { ordinations })
}

#[utoipa::path(
    get,
    path = "/ordinations/daily-fixed",
    responses(
        (status = 200, description = "All fixed-daily ordinations", body = dto::ListDailyFixedOrdinationsRes)
    )
)]
/// Lists all fixed-daily ("DagligFast") ordinations across all patients.
#[axum::debug_handler]
async fn list_daily_fixed_ordinations(
    State(state): State<AppState>,
) -> Json<dto::ListDailyFixedOrdinationsRes> {
    let ordinations = state
        .service
        .fixed_daily_ordinations()
        .iter()
        .filter_map(convert::daily_fixed_res)
        .collect();
    Json(dto::ListDailyFixedOrdinationsRes { ordinations })
}

#[utoipa::path(
    get,
    path = "/ordinations/daily-variable",
    responses(
        (status = 200, description = "All variable-daily ordinations", body = dto::ListDailyVariableOrdinationsRes)
    )
)]
/// Lists all variable-daily ("DagligSkæv") ordinations across all patients.
#[axum::debug_handler]
async fn list_daily_variable_ordinations(
    State(state): State<AppState>,
) -> Json<dto::ListDailyVariableOrdinationsRes> {
    let ordinations = state
        .service
        .variable_daily_ordinations()
        .iter()
        .filter_map(convert::daily_variable_res)
        .collect();
    Json(dto::ListDailyVariableOrdinationsRes { ordinations })
}

#[utoipa::path(
    post,
    path = "/ordinations/pn",
    request_body = dto::CreatePnOrdinationReq,
    responses(
        (status = 201, description = "Ordination created", body = dto::PnOrdinationRes),
        (status = 400, description = "Dose or date validation failed", body = dto::ErrorRes),
        (status = 404, description = "Patient or medication not found", body = dto::ErrorRes)
    )
)]
/// Creates an as-needed ordination after validating the requested dose
/// against the patient's recommended daily ceiling.
#[axum::debug_handler]
async fn create_pn_ordination(
    State(state): State<AppState>,
    Json(req): Json<dto::CreatePnOrdinationReq>,
) -> Result<(StatusCode, Json<dto::PnOrdinationRes>), ErrorResponse> {
    let ordination = state
        .service
        .create_as_needed(
            PatientId::new(req.patient_id),
            MedicationId::new(req.medication_id),
            req.units_per_administration,
            req.start,
            req.end,
        )
        .map_err(error_response)?;

    match convert::pn_res(&ordination) {
        Some(res) => Ok((StatusCode::CREATED, Json(res))),
        None => Err(internal_error()),
    }
}

#[utoipa::path(
    post,
    path = "/ordinations/daily-fixed",
    request_body = dto::CreateDailyFixedOrdinationReq,
    responses(
        (status = 201, description = "Ordination created", body = dto::DailyFixedOrdinationRes),
        (status = 400, description = "Dose or date validation failed", body = dto::ErrorRes),
        (status = 404, description = "Patient or medication not found", body = dto::ErrorRes)
    )
)]
/// Creates a fixed-daily ordination; the validated dose is the sum of the
/// four slot quantities.
#[axum::debug_handler]
async fn create_daily_fixed_ordination(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateDailyFixedOrdinationReq>,
) -> Result<(StatusCode, Json<dto::DailyFixedOrdinationRes>), ErrorResponse> {
    let ordination = state
        .service
        .create_fixed_daily(
            PatientId::new(req.patient_id),
            MedicationId::new(req.medication_id),
            req.morning,
            req.noon,
            req.evening,
            req.night,
            req.start,
            req.end,
        )
        .map_err(error_response)?;

    match convert::daily_fixed_res(&ordination) {
        Some(res) => Ok((StatusCode::CREATED, Json(res))),
        None => Err(internal_error()),
    }
}

#[utoipa::path(
    post,
    path = "/ordinations/daily-variable",
    request_body = dto::CreateDailyVariableOrdinationReq,
    responses(
        (status = 201, description = "Ordination created", body = dto::DailyVariableOrdinationRes),
        (status = 400, description = "Dose or date validation failed", body = dto::ErrorRes),
        (status = 404, description = "Patient or medication not found", body = dto::ErrorRes)
    )
)]
/// Creates a variable-daily ordination from caller-defined dose slots.
#[axum::debug_handler]
async fn create_daily_variable_ordination(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateDailyVariableOrdinationReq>,
) -> Result<(StatusCode, Json<dto::DailyVariableOrdinationRes>), ErrorResponse> {
    let doses = req
        .doses
        .iter()
        .map(|slot| Dose::new(slot.time, slot.quantity))
        .collect();

    let ordination = state
        .service
        .create_variable_daily(
            PatientId::new(req.patient_id),
            MedicationId::new(req.medication_id),
            doses,
            req.start,
            req.end,
        )
        .map_err(error_response)?;

    match convert::daily_variable_res(&ordination) {
        Some(res) => Ok((StatusCode::CREATED, Json(res))),
        None => Err(internal_error()),
    }
}

#[utoipa::path(
    post,
    path = "/ordinations/{id}/administrations",
    request_body = dto::RecordAdministrationReq,
    params(
        ("id" = u64, Path, description = "Ordination identifier")
    ),
    responses(
        (status = 200, description = "Administration outcome", body = dto::AdministrationRes)
    )
)]
/// Marks an ordination as administered on a given date.
///
/// Always answers 200: an unknown ordination or a date outside the validity
/// period is an expected outcome reported in the body, not an error.
#[axum::debug_handler]
async fn record_administration(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<dto::RecordAdministrationReq>,
) -> Json<dto::AdministrationRes> {
    let outcome = state
        .service
        .record_administration(OrdinationId::new(id), req.given_at);
    Json(dto::AdministrationRes {
        ok: outcome.is_recorded(),
        message: outcome.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/patients/{patient_id}/recommended-dose/{medication_id}",
    params(
        ("patient_id" = u64, Path, description = "Patient identifier"),
        ("medication_id" = u64, Path, description = "Medication identifier")
    ),
    responses(
        (status = 200, description = "Recommended daily ceiling", body = dto::RecommendedDoseRes),
        (status = 404, description = "Patient or medication not found", body = dto::ErrorRes)
    )
)]
/// The weight-tiered recommended daily dose for a patient/medication pair.
#[axum::debug_handler]
async fn recommended_dose(
    State(state): State<AppState>,
    Path((patient_id, medication_id)): Path<(u64, u64)>,
) -> Result<Json<dto::RecommendedDoseRes>, ErrorResponse> {
    let dose = state
        .service
        .recommended_daily_dose(PatientId::new(patient_id), MedicationId::new(medication_id))
        .map_err(error_response)?;

    Ok(Json(dto::RecommendedDoseRes {
        patient_id,
        medication_id,
        recommended_daily_dose: dose,
    }))
}

fn internal_error() -> ErrorResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(dto::ErrorRes {
            error: "internal error".into(),
        }),
    )
}
