pub mod toml_config;

use crate::core::StoreConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "site-admin")]
#[command(about = "Edit the site's content collections over the config API")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:5000/api/admin")]
    pub base_url: String,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Path to a TOML config file (overrides --base-url)")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print a collection in display order
    List { collection: String },
    /// Move an item to a new position and persist the resulting order
    Move {
        collection: String,
        id: i64,
        index: usize,
    },
    /// Create an item from a JSON object
    Create {
        collection: String,
        #[arg(long, help = "Item fields as a JSON object")]
        data: String,
    },
    /// Update an item's fields from a JSON object
    Update {
        collection: String,
        id: i64,
        #[arg(long, help = "Fields to change, as a JSON object")]
        data: String,
    },
    /// Delete an item
    Delete { collection: String, id: i64 },
}

impl StoreConfig for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn required_fields(&self, _collection: &str) -> &[String] {
        // Field rules only come from a TOML config file.
        &[]
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}
