#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the theft map server.
//!
//! Incident records and statistics snapshots are served as-is from their
//! own model crates; this crate only holds the types that exist purely
//! for the HTTP contract.

use serde::{Deserialize, Serialize};
use theft_map_incident_models::IncidentCategory;

/// Query parameters for the incidents listing endpoint.
///
/// The Spanish parameter names used by the original frontend are accepted
/// as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentQueryParams {
    /// Category to match exactly; `todos` or `all` disables the filter.
    #[serde(alias = "tipo")]
    pub category: Option<String>,
    /// Earliest occurrence date, inclusive.
    #[serde(alias = "fechaDesde")]
    pub from: Option<String>,
    /// Latest occurrence date, inclusive.
    #[serde(alias = "fechaHasta")]
    pub to: Option<String>,
}

/// One entry of the category list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategory {
    /// Stored category value.
    pub name: IncidentCategory,
    /// Display label.
    pub label: String,
}

impl From<IncidentCategory> for ApiCategory {
    fn from(category: IncidentCategory) -> Self {
        Self {
            name: category,
            label: category.label().to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Error body returned for any failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
