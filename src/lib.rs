use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{error, http::header, web, App, HttpResponse, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod document;
pub mod plate;
pub mod policy;
pub mod state;
pub mod transliteration;
pub mod validation;
pub mod vehicles;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// JSON extractor settings: body limit, and malformed bodies answered with
/// an `ErrorResponse` instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(config::JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            log::warn!("Rejected JSON body: {}", err);
            let response = HttpResponse::BadRequest().json(ErrorResponse::new(&err.to_string()));
            error::InternalError::from_response(err, response).into()
        })
}

/// Everything mounted under `/api`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(policy::config)
        .configure(vehicles::config);
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::policy::handlers::generate_pdf,
        crate::policy::handlers::health,
        crate::policy::handlers::validate_date,
        crate::policy::handlers::transliterate,
        crate::policy::handlers::convert_uppercase,
        crate::policy::handlers::validate_license_plate,
        crate::policy::handlers::parse_license_plate,
        crate::vehicles::handlers::get_brands,
        crate::vehicles::handlers::get_models,
        crate::vehicles::handlers::search_vehicles
    ),
    components(
        schemas(
            ErrorResponse,
            policy::models::PolicySubmission,
            policy::models::VehicleType,
            policy::handlers::HealthResponse,
            policy::handlers::DateRequest,
            policy::handlers::ValidityResponse,
            policy::handlers::PlateValidationRequest,
            policy::handlers::PlateParseRequest,
            policy::handlers::PlateParseResponse,
            plate::PlateCategory,
            plate::StandardPlate,
            plate::TrailerPlate,
            plate::TwoLinePlate,
            transliteration::TextPayload,
            vehicles::models::BrandSummary,
            vehicles::models::ModelSummary,
            vehicles::models::SearchHit,
            vehicles::models::SearchHitKind,
            vehicles::models::BrandsResponse,
            vehicles::models::ModelsResponse,
            vehicles::models::SearchResponse,
        )
    ),
    tags(
        (name = "Policy", description = "Policy PDF generation."),
        (name = "Utilities", description = "Form helpers: dates, transliteration, plates."),
        (name = "Vehicles", description = "Vehicle brand and model catalog.")
    ),
    servers(
        (url = "http://127.0.0.1:5000", description = "Localhost")
    )
)]
pub struct ApiDoc;

fn build_cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600)
}

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    if !config.template_path.exists() {
        log::warn!(
            "Policy template {} does not exist; PDF generation will fail until it is provided",
            config.template_path.display()
        );
    }

    let bind_address = config.bind_address();
    let allowed_origins = config.allowed_origins.clone();
    let app_state = web::Data::new(AppState::new(config));

    let prometheus = PrometheusMetricsBuilder::new("policy_pdf_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!(
        "Starting server at http://{}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(build_cors(&allowed_origins))
            .app_data(app_state.clone())
            .service(web::scope("/api").configure(configure_api))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind_address)?
    .run()
    .await
}
