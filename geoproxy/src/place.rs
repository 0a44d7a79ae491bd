//! Place records and normalization of Nominatim search results.
//!
//! Nominatim returns a list of rich records (`place_id`, `osm_type`,
//! `address`, `boundingbox`, ...). The relay only keeps three fields and
//! renames `display_name` to `name`:
//!
//! ```text
//! {"display_name": "Paris, France", "lat": "48.85", "lon": "2.35", ...}
//!   -> {"name": "Paris, France", "lat": "48.85", "lon": "2.35"}
//! ```
//!
//! A record lacking any of the three fields is dropped rather than reported.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SearchError};

/// A normalized search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Place {
    /// Human readable name (Nominatim `display_name`).
    #[cfg_attr(feature = "openapi", schema(example = "Paris, Île-de-France, France"))]
    pub name: String,
    /// Latitude in decimal degrees, as sent by Nominatim.
    #[cfg_attr(feature = "openapi", schema(example = "48.8534951"))]
    pub lat: String,
    /// Longitude in decimal degrees, as sent by Nominatim.
    #[cfg_attr(feature = "openapi", schema(example = "2.3483915"))]
    pub lon: String,
}

impl Place {
    /// Build a place from one upstream record.
    ///
    /// Returns `None` unless `display_name`, `lat` and `lon` are all present
    /// with a usable value (non-empty string or non-zero number).
    pub fn from_record(record: &Value) -> Option<Self> {
        let record = record.as_object()?;
        Some(Self {
            name: field_text(record.get("display_name")?)?,
            lat: field_text(record.get("lat")?)?,
            lon: field_text(record.get("lon")?)?,
        })
    }
}

/// Convert a field to text if it holds a truthy scalar.
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Normalize a raw Nominatim payload into places, preserving upstream order.
///
/// # Errors
///
/// Returns [`SearchError::InvalidResponseFormat`] if the payload is not a
/// JSON array.
pub fn normalize_places(payload: &Value) -> Result<Vec<Place>> {
    let records = payload
        .as_array()
        .ok_or(SearchError::InvalidResponseFormat)?;

    Ok(records.iter().filter_map(Place::from_record).collect())
}
