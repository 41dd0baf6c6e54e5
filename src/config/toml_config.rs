use crate::core::StoreConfig;
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based configuration for the admin tool:
///
/// ```toml
/// [store]
/// base_url = "http://localhost:5000/api/admin"
/// timeout_seconds = 30
///
/// [[collections]]
/// name = "testimonials"
/// required_fields = ["name", "service", "text"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreSection,
    #[serde(default)]
    pub collections: Vec<CollectionSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSection {
    pub name: String,
    #[serde(default)]
    pub required_fields: Vec<String>,
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self> {
        let config: TomlConfig =
            toml::from_str(content).map_err(|e| AdminError::ConfigError {
                message: format!("Failed to parse TOML config: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }
}

impl StoreConfig for TomlConfig {
    fn base_url(&self) -> &str {
        &self.store.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.store.timeout_seconds.unwrap_or(30)
    }

    fn required_fields(&self, collection: &str) -> &[String] {
        self.collections
            .iter()
            .find(|section| section.name == collection)
            .map(|section| section.required_fields.as_slice())
            .unwrap_or(&[])
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("store.base_url", &self.store.base_url)?;
        validate_positive_number("store.timeout_seconds", self.timeout_seconds(), 1)?;

        for section in &self.collections {
            if section.name.trim().is_empty() {
                return Err(AdminError::InvalidConfigValueError {
                    field: "collections.name".to_string(),
                    value: section.name.clone(),
                    reason: "Collection name cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
