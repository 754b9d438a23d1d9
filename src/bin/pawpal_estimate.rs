//! One-shot meal estimate
//!
//! Usage: pawpal_estimate "1 cup boiled chicken breast + 1/2 cup white rice"
//!
//! Runs the dangerous-keyword scan and the estimator over the arguments and
//! prints the result as JSON.

use pawpal::catalog::Catalog;
use pawpal::config::Config;
use pawpal::tools::meals;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.trim().is_empty() {
        eprintln!("Usage: pawpal_estimate <meal text>");
        std::process::exit(2);
    }

    let config = Config::from_env();
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    };

    let response = meals::estimate_meal(&catalog, &text)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
