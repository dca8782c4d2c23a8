use actix_web::{http::header, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::models::PolicySubmission;
use super::validation::is_valid_date;
use crate::document::Generator;
use crate::plate::{self, PlateCategory, PlateRecord};
use crate::transliteration::{transliterate_payload, uppercase_payload, TextPayload};
use crate::validation::ValidationError;
use crate::{AppState, ErrorResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DateRequest {
    #[serde(default)]
    pub date: Option<String>,
}

/// Outcome of a single-value check. `error` is absent when `valid` is true.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidityResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidityResponse {
    fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// The plate stays raw JSON here so a missing or unknown category is
/// answered as an invalid plate rather than a malformed body.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PlateValidationRequest {
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub license_plate: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlateParseRequest {
    pub text: String,
    #[serde(default)]
    pub category: PlateCategory,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlateParseResponse {
    #[schema(value_type = Option<Object>)]
    pub record: Option<PlateRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/generate-pdf",
    tag = "Policy",
    request_body = PolicySubmission,
    responses(
        (status = 200, description = "Filled policy PDF", content_type = "application/pdf"),
        (status = 400, description = "One or more fields are invalid", body = ErrorResponse),
        (status = 500, description = "Template missing or PDF could not be produced", body = ErrorResponse)
    )
)]
pub async fn generate_pdf(
    state: web::Data<AppState>,
    body: web::Json<PolicySubmission>,
) -> impl Responder {
    let request = match body.into_inner().into_request() {
        Ok(request) => request,
        Err(errors) => {
            let message = errors.joined();
            log::warn!("Rejected policy submission: {}", message);
            return HttpResponse::BadRequest().json(ErrorResponse::new(&message));
        }
    };

    let generator = state.generator.clone();
    let document = match web::block(move || generator.generate(&request)).await {
        Ok(Ok(document)) => document,
        Ok(Err(e)) => {
            log::error!("Policy document generation failed: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new(&e.to_string()));
        }
        Err(e) => {
            log::error!("Policy document task failed: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to generate PDF"));
        }
    };

    log::info!("Sending {} ({} bytes)", document.filename, document.pdf.len());
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.filename),
        ))
        .body(document.pdf)
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Utilities",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "Policy PDF service is running".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/validate-date",
    tag = "Utilities",
    request_body = DateRequest,
    responses(
        (status = 200, description = "Whether the date is a real DD.MM.YYYY day", body = ValidityResponse)
    )
)]
pub async fn validate_date(body: web::Json<DateRequest>) -> impl Responder {
    let date = body.date.as_deref().filter(|d| !d.trim().is_empty());
    let response = match date {
        None => ValidityResponse::invalid("Дата не указана"),
        Some(date) => ValidityResponse {
            valid: is_valid_date(date),
            error: None,
        },
    };
    HttpResponse::Ok().json(response)
}

#[utoipa::path(
    post,
    path = "/api/transliterate",
    tag = "Utilities",
    request_body = TextPayload,
    responses(
        (status = 200, description = "Transliterated fields", body = BTreeMap<String, String>)
    )
)]
pub async fn transliterate(body: web::Json<TextPayload>) -> web::Json<BTreeMap<String, String>> {
    web::Json(transliterate_payload(&body))
}

#[utoipa::path(
    post,
    path = "/api/convert-uppercase",
    tag = "Utilities",
    request_body = TextPayload,
    responses(
        (status = 200, description = "Uppercased fields", body = BTreeMap<String, String>)
    )
)]
pub async fn convert_uppercase(
    body: web::Json<TextPayload>,
) -> web::Json<BTreeMap<String, String>> {
    web::Json(uppercase_payload(&body))
}

#[utoipa::path(
    post,
    path = "/api/validate-license-plate",
    tag = "Utilities",
    request_body = PlateValidationRequest,
    responses(
        (status = 200, description = "Plate check with every violated rule", body = ValidityResponse)
    )
)]
pub async fn validate_license_plate(body: web::Json<PlateValidationRequest>) -> impl Responder {
    let record = match &body.license_plate {
        Some(value) => PlateRecord::from_json(value),
        None => Err(ValidationError::new("category", "Не указана категория")),
    };
    let response = match record {
        Err(err) => ValidityResponse::invalid(err.message),
        Ok(record) => {
            let errors = plate::validate(&record);
            if errors.is_empty() {
                ValidityResponse::valid()
            } else {
                ValidityResponse::invalid(errors.joined())
            }
        }
    };
    HttpResponse::Ok().json(response)
}

#[utoipa::path(
    post,
    path = "/api/parse-license-plate",
    tag = "Utilities",
    request_body = PlateParseRequest,
    responses(
        (status = 200, description = "Parsed record, or null when the text does not match the layout", body = PlateParseResponse)
    )
)]
pub async fn parse_license_plate(body: web::Json<PlateParseRequest>) -> impl Responder {
    let record = plate::parse(&body.text, body.category);
    let canonical = record.as_ref().map(plate::canonicalize);
    HttpResponse::Ok().json(PlateParseResponse { record, canonical })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/generate-pdf").route(web::post().to(generate_pdf)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/validate-date").route(web::post().to(validate_date)))
        .service(web::resource("/transliterate").route(web::post().to(transliterate)))
        .service(web::resource("/convert-uppercase").route(web::post().to(convert_uppercase)))
        .service(
            web::resource("/validate-license-plate")
                .route(web::post().to(validate_license_plate)),
        )
        .service(
            web::resource("/parse-license-plate").route(web::post().to(parse_license_plate)),
        );
}
