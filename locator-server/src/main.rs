use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use locator_server::catalog::StopCatalog;
use locator_server::extract::{CapitalizedSpanTagger, LocationExtractor};
use locator_server::presentation::{DirectionsLinks, render_text};
use locator_server::resolver::{QueryResolver, ResolverConfig};
use locator_server::web::{AppState, create_router};

#[derive(Parser, Debug)]
#[command(name = "locator-server")]
#[command(about = "Find the nearest public washroom from a free-text query")]
struct Cli {
    /// Stop dataset (CSV); the built-in Delhi sample is used if unset
    #[arg(long, env = "DATA_PATH", global = true)]
    data_path: Option<PathBuf>,

    /// Minimum stop-name match score (0-100)
    #[arg(long, env = "FUZZY_MATCH_THRESHOLD", default_value_t = 70, global = true)]
    fuzzy_match_threshold: u8,

    /// Maximum walking distance to a washroom, in meters
    #[arg(long, env = "MAX_DISTANCE", default_value_t = 2000.0, global = true)]
    max_distance: f64,

    /// Break ties between equally good stops using washroom ratings
    #[arg(long, env = "CONSIDER_REVIEWS", global = true)]
    consider_reviews: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Listen address
        #[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:3000")]
        listen: String,
    },

    /// Answer a single query and exit
    Ask {
        /// The question, e.g. "toilet near Karol Bagh"
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let resolver = build_resolver(&cli)?;

    match cli.command {
        Command::Serve { listen } => {
            let app = create_router(AppState::new(resolver));

            let listener = tokio::net::TcpListener::bind(&listen)
                .await
                .with_context(|| format!("failed to bind {listen}"))?;
            info!("Washroom locator listening on http://{listen}");
            info!("  POST /locate            - Locate a washroom");
            info!("  GET  /api/stops/search  - Search stops by name");
            info!("  GET  /health            - Health check");

            axum::serve(listener, app).await?;
        }
        Command::Ask { query } => {
            let result = resolver.process_query(&query);
            println!("{}", render_text(&result));
        }
    }

    Ok(())
}

/// Load the catalog and build the resolver; any failure here is fatal.
fn build_resolver(cli: &Cli) -> Result<QueryResolver> {
    let catalog = match &cli.data_path {
        Some(path) => StopCatalog::load(path)
            .with_context(|| format!("failed to load dataset {}", path.display()))?,
        None => {
            info!("no dataset configured, using built-in sample");
            StopCatalog::sample().context("failed to load built-in sample")?
        }
    };

    let config = ResolverConfig::new(cli.fuzzy_match_threshold, cli.max_distance, cli.consider_reviews);
    let extractor = LocationExtractor::new(Arc::new(CapitalizedSpanTagger::new()));
    let links = DirectionsLinks::google_maps().context("invalid map service URL")?;

    let resolver = QueryResolver::new(Arc::new(catalog), extractor, links, config)?;
    info!(
        stops = resolver.catalog().len(),
        threshold = cli.fuzzy_match_threshold,
        max_distance = cli.max_distance,
        consider_reviews = cli.consider_reviews,
        "resolver ready"
    );
    Ok(resolver)
}
