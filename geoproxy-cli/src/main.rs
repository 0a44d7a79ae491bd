use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

/// Nominatim place search CLI tool
#[derive(Parser)]
#[command(name = "geoproxy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the Nominatim instance
    #[arg(
        long,
        env = "GEOPROXY_UPSTREAM_URL",
        default_value = geoproxy::client::DEFAULT_BASE_URL,
        global = true
    )]
    upstream_url: String,

    /// User-Agent sent to Nominatim
    #[arg(
        long,
        env = "GEOPROXY_USER_AGENT",
        default_value = geoproxy::client::DEFAULT_USER_AGENT,
        global = true
    )]
    user_agent: String,

    /// Upstream timeout in milliseconds
    #[arg(long, env = "GEOPROXY_TIMEOUT_MS", default_value_t = geoproxy::client::DEFAULT_TIMEOUT_MS, global = true)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search places by free text
    Search {
        /// Free-text query (e.g. "Paris" or "10 Downing Street, London")
        query: String,

        /// Maximum number of results requested
        #[arg(short, long, env = "GEOPROXY_RESULT_LIMIT", default_value_t = geoproxy::client::DEFAULT_RESULT_LIMIT)]
        limit: u32,

        /// Output results as a JSON array
        #[arg(short, long, conflicts_with = "geojson")]
        json: bool,

        /// Output results as a GeoJSON FeatureCollection
        #[arg(short, long)]
        geojson: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            limit,
            json,
            geojson,
        } => {
            let config = geoproxy::ClientConfig::with_base_url(cli.upstream_url)
                .with_user_agent(cli.user_agent)
                .with_timeout(cli.timeout_ms)
                .with_limit(limit);
            let format = commands::search::OutputFormat::from_flags(json, geojson);
            commands::search::run(config, &query, format).await
        }
    }
}
