//! PawPal
//!
//! An MCP server for dog meal logging, calorie estimation and toxic food
//! screening.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use pawpal::build_info;
use pawpal::catalog::Catalog;
use pawpal::config::Config;
use pawpal::mcp::PawPalService;
use pawpal::tools::advice::{AdviceClient, OpenRouterClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    // Load the food catalog
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    };
    eprintln!(
        "Catalog: {} ({} foods, {} categories)",
        config.catalog_source(),
        catalog.len(),
        catalog.categories().len()
    );

    // Vet advice is optional
    let advice: Option<Arc<dyn AdviceClient>> = match &config.openrouter_api_key {
        Some(key) => {
            let client = OpenRouterClient::new(key.clone(), config.advice_model.clone())?;
            Some(Arc::new(client) as Arc<dyn AdviceClient>)
        }
        None => {
            tracing::info!("OPENROUTER_API_KEY not set, ask_vet will report a missing key");
            None
        }
    };

    // Create the PawPal service
    let service = PawPalService::new(catalog, config.catalog_source(), advice);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
