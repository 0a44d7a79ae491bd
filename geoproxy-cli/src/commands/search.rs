use anyhow::{bail, Context, Result};
use geoproxy::{
    geojson::places_to_feature_collection, ClientConfig, Place, SearchError, SearchServiceBuilder,
};

/// How search results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    GeoJson,
}

impl OutputFormat {
    pub fn from_flags(json: bool, geojson: bool) -> Self {
        if geojson {
            OutputFormat::GeoJson
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(config: ClientConfig, query: &str, format: OutputFormat) -> Result<()> {
    let upstream = config.base_url.clone();
    let service = SearchServiceBuilder::from(config)
        .build()
        .context("Failed to create search service")?;

    let places = match service.search(Some(query)).await {
        Ok(places) => places,
        Err(SearchError::UpstreamStatus { status, details }) => {
            bail!("Nominatim at {} responded with status {}: {}", upstream, status, details)
        }
        Err(e) => return Err(e).context(format!("Search for {:?} failed", query)),
    };

    println!("{}", render(&places, format)?);

    Ok(())
}

/// Render places in the requested format.
fn render(places: &[Place], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(places)?),
        OutputFormat::GeoJson => Ok(serde_json::to_string(&places_to_feature_collection(places))?),
        OutputFormat::Text if places.is_empty() => Ok("no results".to_string()),
        OutputFormat::Text => Ok(places
            .iter()
            .map(|p| format!("{}\t{}\t{}", p.lat, p.lon, p.name))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
