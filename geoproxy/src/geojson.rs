//! GeoJSON export of search results.
//!
//! Enable the `geojson` feature to use this module.
//!
//! # Example
//!
//! ```ignore
//! use geoproxy::geojson::places_to_feature_collection;
//!
//! let places = service.search(Some("Paris")).await?;
//! let collection = places_to_feature_collection(&places);
//! println!("{}", collection);
//! // {"type":"FeatureCollection","features":[{"type":"Feature",
//! //   "geometry":{"type":"Point","coordinates":[2.35,48.85]},
//! //   "properties":{"name":"Paris, France"}}]}
//! ```

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoJsonValue};

use crate::place::Place;

/// Convert places into a GeoJSON `FeatureCollection`.
///
/// Each place becomes a feature with a `Point` geometry in GeoJSON order
/// (`[longitude, latitude]`) and a `name` property. A place whose
/// coordinates do not parse as numbers keeps its properties but has no
/// geometry.
pub fn places_to_feature_collection(places: &[Place]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: places.iter().map(place_to_feature).collect(),
        foreign_members: None,
    }
}

/// Convert a single place into a GeoJSON `Feature`.
pub fn place_to_feature(place: &Place) -> Feature {
    let geometry = match (place.lon.trim().parse::<f64>(), place.lat.trim().parse::<f64>()) {
        (Ok(lon), Ok(lat)) => Some(Geometry::new(GeoJsonValue::Point(vec![lon, lat]))),
        _ => None,
    };

    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), place.name.clone().into());

    Feature {
        bbox: None,
        geometry,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
