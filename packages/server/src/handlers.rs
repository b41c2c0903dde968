//! HTTP handler functions for the theft map API.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use theft_map_incident_models::{IncidentCategory, NewIncident, parse_occurred_on};
use theft_map_server_models::{ApiCategory, ApiError, ApiHealth, IncidentQueryParams};
use theft_map_stats::collect_stats;
use theft_map_store::RecordFilter;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/categories`
///
/// Returns the incident categories in enumeration order.
pub async fn categories() -> HttpResponse {
    let list: Vec<ApiCategory> = IncidentCategory::all()
        .iter()
        .copied()
        .map(ApiCategory::from)
        .collect();

    HttpResponse::Ok().json(list)
}

/// `GET /api/incidents`
///
/// Lists stored reports, optionally filtered by category and date range.
pub async fn list_incidents(
    state: web::Data<AppState>,
    params: web::Query<IncidentQueryParams>,
) -> HttpResponse {
    let params = params.into_inner();

    let filter = match build_filter(params) {
        Ok(filter) => filter,
        Err(message) => return HttpResponse::BadRequest().json(ApiError::new(message)),
    };

    match state.store.list_all().await {
        Ok(records) => HttpResponse::Ok().json(filter.apply(records)),
        Err(e) => {
            log::error!("Failed to list incidents: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to list incidents"))
        }
    }
}

/// `POST /api/incidents`
///
/// Validates and stores a new report, returning it with its generated ID.
pub async fn create_incident(
    state: web::Data<AppState>,
    body: web::Json<NewIncident>,
) -> HttpResponse {
    let record = match body.into_inner().into_record(Utc::now()) {
        Ok(record) => record,
        Err(e) => {
            log::warn!("Rejected incident report: {e}");
            return HttpResponse::BadRequest().json(ApiError::new(e.to_string()));
        }
    };

    match state.store.append(record.clone()).await {
        Ok(()) => HttpResponse::Created().json(record),
        Err(e) => {
            log::error!("Failed to store incident: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to store incident"))
        }
    }
}

/// `GET /api/incidents/stats`
///
/// Returns category counts, hot zones, and the monthly trend over every
/// stored report.
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    match collect_stats(state.store.as_ref()).await {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(e) => {
            log::error!("Failed to compute statistics: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to compute statistics"))
        }
    }
}

fn build_filter(params: IncidentQueryParams) -> Result<RecordFilter, String> {
    let parse_bound = |value: Option<String>| {
        value
            .filter(|v| !v.trim().is_empty())
            .map(|v| parse_occurred_on(&v))
            .transpose()
            .map_err(|e| e.to_string())
    };

    Ok(RecordFilter {
        category: params.category.filter(|c| !c.trim().is_empty()),
        from: parse_bound(params.from)?,
        to: parse_bound(params.to)?,
    })
}
