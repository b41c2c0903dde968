#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident category taxonomy and report record types.
//!
//! Defines the closed set of theft/robbery categories a citizen can pick
//! when reporting an incident on the map, plus the stored shape of a
//! report. Records keep their category and date exactly as stored so that
//! legacy or hand-edited data files still load; typed accessors parse them
//! on demand.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The closed set of incident categories.
///
/// Declaration order is the canonical enumeration order used for output
/// (`Ord` follows it).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum IncidentCategory {
    /// Robbery with violence or threat against a person
    #[serde(rename = "asalto")]
    #[strum(serialize = "asalto")]
    Assault,
    /// Theft of a car or motorcycle
    #[serde(rename = "robo_vehiculo")]
    #[strum(serialize = "robo_vehiculo")]
    VehicleTheft,
    /// Theft of a mobile phone
    #[serde(rename = "robo_celular")]
    #[strum(serialize = "robo_celular")]
    PhoneTheft,
    /// Theft of a bicycle
    #[serde(rename = "robo_bicicleta")]
    #[strum(serialize = "robo_bicicleta")]
    BicycleTheft,
    /// Theft without violence (pickpocketing, bag snatching)
    #[serde(rename = "hurto")]
    #[strum(serialize = "hurto")]
    PettyTheft,
    /// Anything not fitting the categories above
    #[serde(rename = "otro")]
    #[strum(serialize = "otro")]
    Other,
}

impl IncidentCategory {
    /// Returns all variants in enumeration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Assault,
            Self::VehicleTheft,
            Self::PhoneTheft,
            Self::BicycleTheft,
            Self::PettyTheft,
            Self::Other,
        ]
    }

    /// Human-readable label shown in the report form and charts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Assault => "Asalto",
            Self::VehicleTheft => "Robo de Vehículo",
            Self::PhoneTheft => "Robo de Celular",
            Self::BicycleTheft => "Robo de Bicicleta",
            Self::PettyTheft => "Hurto",
            Self::Other => "Otro",
        }
    }
}

/// Review status of a report.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum IncidentStatus {
    /// Submitted, not yet reviewed
    #[default]
    #[serde(rename = "pendiente")]
    #[strum(serialize = "pendiente")]
    Pending,
    /// Confirmed by a reviewer
    #[serde(rename = "verificada")]
    #[strum(serialize = "verificada")]
    Verified,
    /// Rejected by a reviewer
    #[serde(rename = "rechazada")]
    #[strum(serialize = "rechazada")]
    Rejected,
}

/// Where an incident happened, as picked on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Street address, if the reporter gave one.
    #[serde(default, alias = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Neighborhood or zone name.
    #[serde(default, alias = "zona", skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl Location {
    /// Whether the coordinates are finite and within WGS84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Optional reporter contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default, alias = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A stored incident report.
///
/// `category` and `occurred_at` hold the raw stored strings. Use
/// [`IncidentRecord::category`] and [`IncidentRecord::occurred_on`] for
/// the typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Unique report ID (`denuncia-<millis>-<suffix>`).
    pub id: String,
    /// Raw category string.
    #[serde(alias = "tipo")]
    pub category: String,
    /// Raw occurrence date (`YYYY-MM-DD` or an ISO 8601 timestamp).
    #[serde(alias = "fecha")]
    pub occurred_at: String,
    /// Time of day as typed by the reporter.
    #[serde(default, alias = "hora", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Map location.
    #[serde(alias = "ubicacion")]
    pub location: Location,
    /// Brand of the stolen item.
    #[serde(default, alias = "marca", skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Model of the stolen item.
    #[serde(default, alias = "modelo", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// How the theft was carried out.
    #[serde(default, alias = "modalidad", skip_serializing_if = "Option::is_none")]
    pub modality: Option<String>,
    /// Free-text description.
    #[serde(default, alias = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reporter contact details.
    #[serde(default, alias = "contacto", skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// Review status.
    #[serde(default, alias = "estado")]
    pub status: IncidentStatus,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// When the report was last modified.
    pub updated_at: DateTime<Utc>,
}

impl IncidentRecord {
    /// Parses the stored category, returning `None` for values outside
    /// the closed set.
    #[must_use]
    pub fn category(&self) -> Option<IncidentCategory> {
        self.category.parse().ok()
    }

    /// Parses the stored occurrence date.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDateError`] if the stored value is not a
    /// recognized date or timestamp.
    pub fn occurred_on(&self) -> Result<NaiveDate, InvalidDateError> {
        parse_occurred_on(&self.occurred_at)
    }
}

/// Error returned when a stored date string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid incident date {value:?}")]
pub struct InvalidDateError {
    /// The unparseable value.
    pub value: String,
}

/// Parses an occurrence date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and offset-less
/// `YYYY-MM-DDTHH:MM:SS[.f]` timestamps. For RFC 3339 input the calendar
/// date is the one written in the timestamp, in its own offset.
///
/// # Errors
///
/// Returns [`InvalidDateError`] if none of the formats match.
pub fn parse_occurred_on(value: &str) -> Result<NaiveDate, InvalidDateError> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    Err(InvalidDateError {
        value: value.to_string(),
    })
}

/// Errors that make a new report unacceptable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidIncidentError {
    /// Latitude or longitude is out of range or not finite.
    #[error("invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates {
        /// Submitted latitude.
        lat: f64,
        /// Submitted longitude.
        lng: f64,
    },

    /// The occurrence date does not parse.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),
}

/// A report as submitted through the intake form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncident {
    /// Incident category.
    #[serde(alias = "tipo")]
    pub category: IncidentCategory,
    /// Occurrence date.
    #[serde(alias = "fecha")]
    pub occurred_at: String,
    /// Time of day.
    #[serde(default, alias = "hora")]
    pub time: Option<String>,
    /// Map location.
    #[serde(alias = "ubicacion")]
    pub location: Location,
    /// Brand of the stolen item.
    #[serde(default, alias = "marca")]
    pub brand: Option<String>,
    /// Model of the stolen item.
    #[serde(default, alias = "modelo")]
    pub model: Option<String>,
    /// How the theft was carried out.
    #[serde(default, alias = "modalidad")]
    pub modality: Option<String>,
    /// Free-text description.
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
    /// Reporter contact details.
    #[serde(default, alias = "contacto")]
    pub contact: Option<Contact>,
}

impl NewIncident {
    /// Validates the submission and turns it into a pending record
    /// stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIncidentError`] if the coordinates are out of
    /// range or the date does not parse.
    pub fn into_record(self, now: DateTime<Utc>) -> Result<IncidentRecord, InvalidIncidentError> {
        if !self.location.is_valid() {
            return Err(InvalidIncidentError::InvalidCoordinates {
                lat: self.location.lat,
                lng: self.location.lng,
            });
        }
        parse_occurred_on(&self.occurred_at)?;

        Ok(IncidentRecord {
            id: generate_id(now),
            category: self.category.to_string(),
            occurred_at: self.occurred_at,
            time: self.time,
            location: self.location,
            brand: self.brand,
            model: self.model,
            modality: self.modality,
            description: self.description,
            contact: self.contact,
            status: IncidentStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Builds a report ID of the form `denuncia-<epoch millis>-<9 chars>`.
fn generate_id(now: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("denuncia-{}-{}", now.timestamp_millis(), &suffix[..9])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_location() -> Location {
        Location {
            lat: -12.0464,
            lng: -77.0428,
            address: None,
            zone: None,
        }
    }

    #[test]
    fn category_strings_roundtrip() {
        for cat in IncidentCategory::all() {
            let parsed: IncidentCategory = cat.to_string().parse().unwrap();
            assert_eq!(parsed, *cat);
        }
        assert_eq!(IncidentCategory::PettyTheft.to_string(), "hurto");
        assert!("robo_casa".parse::<IncidentCategory>().is_err());
    }

    #[test]
    fn enumeration_order_matches_ord() {
        let mut sorted = IncidentCategory::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, IncidentCategory::all());
    }

    #[test]
    fn parses_supported_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(parse_occurred_on("2024-03-07").unwrap(), expected);
        assert_eq!(
            parse_occurred_on("2024-03-07T00:00:00.000Z").unwrap(),
            expected
        );
        assert_eq!(
            parse_occurred_on("2024-03-07T23:30:00-05:00").unwrap(),
            expected
        );
        assert_eq!(parse_occurred_on("2024-03-07T10:15:00").unwrap(), expected);
        assert!(parse_occurred_on("07/03/2024").is_err());
        assert!(parse_occurred_on("").is_err());
    }

    #[test]
    fn loads_legacy_spanish_keys() {
        let json = r#"{
            "id": "denuncia-1-abc",
            "tipo": "robo_celular",
            "fecha": "2024-01-15T00:00:00.000Z",
            "ubicacion": { "lat": -12.05, "lng": -77.04, "direccion": "Av. Arequipa 100" },
            "estado": "verificada",
            "createdAt": "2024-01-15T10:00:00Z",
            "updatedAt": "2024-01-15T10:00:00Z"
        }"#;
        let record: IncidentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category(), Some(IncidentCategory::PhoneTheft));
        assert_eq!(record.status, IncidentStatus::Verified);
        assert_eq!(record.location.address.as_deref(), Some("Av. Arequipa 100"));
        assert_eq!(
            record.occurred_on().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn unknown_category_loads_but_does_not_parse() {
        let json = r#"{
            "id": "x",
            "category": "robo_casa",
            "occurredAt": "2024-01-15",
            "location": { "lat": 0.0, "lng": 0.0 },
            "createdAt": "2024-01-15T10:00:00Z",
            "updatedAt": "2024-01-15T10:00:00Z"
        }"#;
        let record: IncidentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "robo_casa");
        assert_eq!(record.category(), None);
        assert_eq!(record.status, IncidentStatus::Pending);
    }

    #[test]
    fn new_incident_becomes_pending_record() {
        let now = Utc::now();
        let record = NewIncident {
            category: IncidentCategory::BicycleTheft,
            occurred_at: "2024-05-01".to_string(),
            time: Some("18:30".to_string()),
            location: sample_location(),
            brand: None,
            model: None,
            modality: None,
            description: Some("Se llevaron la bici".to_string()),
            contact: None,
        }
        .into_record(now)
        .unwrap();

        assert!(record.id.starts_with("denuncia-"));
        assert_eq!(record.id.rsplit('-').next().unwrap().len(), 9);
        assert_eq!(record.category, "robo_bicicleta");
        assert_eq!(record.status, IncidentStatus::Pending);
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);
    }

    #[test]
    fn new_incident_rejects_bad_coordinates_and_dates() {
        let mut input = NewIncident {
            category: IncidentCategory::Other,
            occurred_at: "2024-05-01".to_string(),
            time: None,
            location: Location {
                lat: 91.0,
                lng: 0.0,
                address: None,
                zone: None,
            },
            brand: None,
            model: None,
            modality: None,
            description: None,
            contact: None,
        };
        assert!(matches!(
            input.clone().into_record(Utc::now()),
            Err(InvalidIncidentError::InvalidCoordinates { .. })
        ));

        input.location = sample_location();
        input.occurred_at = "ayer".to_string();
        assert!(matches!(
            input.into_record(Utc::now()),
            Err(InvalidIncidentError::InvalidDate(_))
        ));
    }
}
