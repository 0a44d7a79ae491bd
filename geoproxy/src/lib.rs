//! # geoproxy - Nominatim Search Relay
//!
//! Library behind the geoproxy service and CLI. It forwards a free-text
//! search to a [Nominatim](https://nominatim.org/) instance and reduces the
//! answer to a list of `{name, lat, lon}` records.
//!
//! ## Features
//!
//! - **Validated input**: blank or missing queries never reach the network
//! - **Stable output**: records lacking a name or coordinates are dropped
//! - **Classified failures**: timeouts, upstream statuses and malformed
//!   payloads are distinct [`SearchError`] variants
//!
//! ## Quick Start
//!
//! ```ignore
//! use geoproxy::SearchServiceBuilder;
//!
//! let service = SearchServiceBuilder::from_env().build()?;
//! let places = service.search(Some("Paris")).await?;
//! assert!(places.iter().all(|p| !p.name.is_empty()));
//! ```
//!
//! ## Cargo Features
//!
//! - `geojson`: export results as a GeoJSON `FeatureCollection`
//! - `openapi`: derive `utoipa::ToSchema` for [`Place`]

pub mod client;
pub mod error;
pub mod place;
pub mod query;
pub mod service;

#[cfg(feature = "geojson")]
pub mod geojson;

// Re-export main types at crate root for convenience
pub use client::{ClientConfig, NominatimClient};
pub use error::{Result, SearchError};
pub use place::Place;
pub use service::{SearchService, SearchServiceBuilder};
