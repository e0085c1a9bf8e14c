use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "autoflip",
    about = "Flip AI-suggested digital products and expired domains with a simulated wallet"
)]
pub struct Cli {
    /// Base URL of the generation backend (overrides AUTOFLIP_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Use the built-in simulated generator instead of the backend
    #[arg(long, global = true)]
    pub offline: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive flipping session (default)
    Session,
    /// Fetch a batch of product deals as JSON
    Products,
    /// Fetch a batch of expired domains as JSON
    Domains,
    /// Generate a marketing plan for a product
    Plan {
        /// Product JSON (productName, description, category, estimatedAcquisitionCost,
        /// suggestedSalePrice)
        json: String,
    },
    /// Generate a sales pitch for an expired domain
    Pitch {
        /// Domain JSON (domainName, potentialValue, reasoning, category, acquisitionCost)
        json: String,
    },
    /// Ask the expert guide a question and stream the answer
    Ask { message: String },
}
