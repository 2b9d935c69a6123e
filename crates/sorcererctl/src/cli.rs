//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Args, Parser, Subcommand};
use sorcerer_common::{build_request, GenerationRequest};
use std::collections::HashMap;
use std::path::PathBuf;

/// Subject Line Sorcerer CLI
#[derive(Parser, Debug)]
#[command(name = "sorcererctl")]
#[command(about = "Subject Line Sorcerer - email subject lines and preview text in six tones", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to <config dir>/subject-sorcerer/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate subject lines for a campaign
    Generate {
        #[command(flatten)]
        brief: BriefArgs,

        /// API key (overrides llm.api_key and OPENAI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Give up after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Print the compiled instruction without calling the service
    Prompt {
        #[command(flatten)]
        brief: BriefArgs,
    },

    /// What makes a great subject line?
    Tips,
}

/// Campaign brief fields. All optional.
#[derive(Args, Debug, Default, Clone)]
pub struct BriefArgs {
    /// Campaign type (Sale, Product Launch, Newsletter, Event, ...)
    #[arg(long)]
    pub campaign_type: Option<String>,

    /// Who the email is for
    #[arg(long)]
    pub audience: Option<String>,

    /// Offer or sale details
    #[arg(long)]
    pub offer: Option<String>,

    #[arg(long)]
    pub product: Option<String>,

    #[arg(long)]
    pub brand: Option<String>,

    #[arg(long)]
    pub industry: Option<String>,

    /// Opens, Clicks, Awareness, Engagement, Conversions
    #[arg(long)]
    pub goal: Option<String>,

    #[arg(long)]
    pub brand_guidelines: Option<String>,

    /// Two variants per tone
    #[arg(long)]
    pub ab_test: bool,
}

impl BriefArgs {
    /// Flags as the raw field map the brief builder expects.
    pub fn to_fields(&self) -> HashMap<String, String> {
        [
            ("campaignType", &self.campaign_type),
            ("targetAudience", &self.audience),
            ("offerOrSale", &self.offer),
            ("product", &self.product),
            ("brandName", &self.brand),
            ("industry", &self.industry),
            ("goal", &self.goal),
            ("brandGuidelines", &self.brand_guidelines),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name.to_string(), v)))
        .collect()
    }

    pub fn to_request(&self) -> GenerationRequest {
        build_request(&self.to_fields(), self.ab_test)
    }
}
