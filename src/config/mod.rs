pub mod input;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "lambda")]
pub mod lambda;

#[cfg(feature = "cli")]
use crate::adapters::tomba::DEFAULT_API_BASE_URL;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "tomba-etl")]
#[command(about = "Find email addresses for a list of domains with the Tomba domain search API")]
pub struct CliConfig {
    /// Input document (JSON, or TOML with a .toml extension)
    #[arg(short, long, default_value = "INPUT.json")]
    pub input: String,

    /// Directory receiving dataset.json and key_value_store/
    #[arg(long, default_value = "./storage")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Record failed searches as error entries instead of skipping them
    #[arg(long)]
    pub record_search_errors: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage during the run")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn record_search_errors(&self) -> bool {
        self.record_search_errors
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output_path", &self.output_path)?;
        validate_url("api_base_url", &self.api_base_url)?;
        validate_range("timeout_secs", self.timeout_secs, 1, 300)?;

        tracing::debug!("✅ CLI configuration validation passed");
        Ok(())
    }
}
