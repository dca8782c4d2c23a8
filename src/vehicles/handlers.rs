use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use super::catalog::{CatalogError, VehicleCatalog};
use super::models::{BrandsResponse, ModelsResponse, SearchResponse};
use crate::{AppState, ErrorResponse};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// At least two characters; shorter queries return no results
    #[serde(default)]
    pub q: String,
}

async fn load_catalog(state: &web::Data<AppState>) -> Result<Arc<VehicleCatalog>, HttpResponse> {
    state.catalog.get().await.map_err(|e: Arc<CatalogError>| {
        log::error!("Vehicle catalog unavailable: {}", e);
        HttpResponse::InternalServerError()
            .json(ErrorResponse::new("Не удалось загрузить справочник ТС"))
    })
}

#[utoipa::path(
    get,
    path = "/api/vehicle-brands",
    tag = "Vehicles",
    responses(
        (status = 200, description = "All brands in the catalog", body = BrandsResponse),
        (status = 500, description = "Catalog could not be loaded", body = ErrorResponse)
    )
)]
pub async fn get_brands(state: web::Data<AppState>) -> impl Responder {
    match load_catalog(&state).await {
        Ok(catalog) => HttpResponse::Ok().json(BrandsResponse {
            brands: catalog.brands(),
        }),
        Err(response) => response,
    }
}

#[utoipa::path(
    get,
    path = "/api/vehicle-models/{brand_id}",
    tag = "Vehicles",
    params(
        ("brand_id" = String, Path, description = "Brand id, case-insensitive")
    ),
    responses(
        (status = 200, description = "Models of the brand, empty for an unknown brand", body = ModelsResponse),
        (status = 500, description = "Catalog could not be loaded", body = ErrorResponse)
    )
)]
pub async fn get_models(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let brand_id = path.into_inner();
    match load_catalog(&state).await {
        Ok(catalog) => HttpResponse::Ok().json(ModelsResponse {
            models: catalog.models(&brand_id),
        }),
        Err(response) => response,
    }
}

#[utoipa::path(
    get,
    path = "/api/search-vehicles",
    tag = "Vehicles",
    params(SearchQuery),
    responses(
        (status = 200, description = "Up to 20 matching brands and models", body = SearchResponse),
        (status = 500, description = "Catalog could not be loaded", body = ErrorResponse)
    )
)]
pub async fn search_vehicles(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    match load_catalog(&state).await {
        Ok(catalog) => {
            let results = catalog.search(&query.q);
            log::debug!("Vehicle search '{}' -> {} results", query.q, results.len());
            HttpResponse::Ok().json(SearchResponse { results })
        }
        Err(response) => response,
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/vehicle-brands").route(web::get().to(get_brands)))
        .service(web::resource("/vehicle-models/{brand_id}").route(web::get().to(get_models)))
        .service(web::resource("/search-vehicles").route(web::get().to(search_vehicles)));
}
