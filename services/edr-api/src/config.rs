//! EDR configuration loading and types.

use anyhow::{Context, Result};
use edr_protocol::{Contact, Provider};
use observations::CollectionInfo;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// EDR configuration loaded from a YAML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EdrConfig {
    /// Landing page settings.
    #[serde(default)]
    pub landing: LandingConfig,

    /// The single collection served by this instance.
    #[serde(default)]
    pub collection: CollectionConfig,
}

impl EdrConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file is not an error: the defaults are used instead.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(path = %path.display(), "EDR config file does not exist, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;
        let config: EdrConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse: {:?}", path))?;

        tracing::info!(
            path = %path.display(),
            collection = %config.collection.id,
            "Loaded EDR config"
        );

        Ok(config)
    }

    /// Collection description handed to the query engine.
    pub fn collection_info(&self) -> CollectionInfo {
        CollectionInfo {
            id: self.collection.id.clone(),
            title: self.collection.title.clone(),
            description: self.collection.description.clone(),
            keywords: self.collection.keywords.clone(),
        }
    }
}

/// Landing page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandingConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub provider: Option<Provider>,

    #[serde(default)]
    pub contact: Option<Contact>,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            keywords: Vec::new(),
            provider: None,
            contact: None,
        }
    }
}

fn default_title() -> String {
    "Station Observations EDR API".to_string()
}

fn default_description() -> String {
    "OGC API - Environmental Data Retrieval for in-situ weather station observations".to_string()
}

/// Collection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionConfig {
    /// Collection identifier used in the URL path.
    #[serde(default = "default_collection_id")]
    pub id: String,

    #[serde(default = "default_collection_title")]
    pub title: String,

    #[serde(default = "default_collection_description")]
    pub description: String,

    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        let info = CollectionInfo::default();
        Self {
            id: info.id,
            title: info.title,
            description: info.description,
            keywords: info.keywords,
        }
    }
}

fn default_collection_id() -> String {
    CollectionInfo::default().id
}

fn default_collection_title() -> String {
    CollectionInfo::default().title
}

fn default_collection_description() -> String {
    CollectionInfo::default().description
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EdrConfig::load(dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, EdrConfig::default());
        assert_eq!(config.collection.id, "observations");
    }

    #[test]
    fn test_parse_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
landing:
  title: KNMI EDR
  provider:
    name: KNMI
    url: https://www.knmi.nl
collection:
  id: 10-minute-in-situ-meteorological-observations
  keywords: [wind, temperature]
"#
        )
        .unwrap();

        let config = EdrConfig::load(file.path()).unwrap();
        assert_eq!(config.landing.title, "KNMI EDR");
        assert_eq!(config.landing.description, default_description());
        assert_eq!(
            config.landing.provider.as_ref().and_then(|p| p.name.as_deref()),
            Some("KNMI")
        );

        let info = config.collection_info();
        assert_eq!(info.id, "10-minute-in-situ-meteorological-observations");
        assert_eq!(info.keywords, vec!["wind", "temperature"]);
    }

    #[test]
    fn test_bundled_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/edr.yaml");
        let config = EdrConfig::load(path).unwrap();
        assert_eq!(config.collection.id, "observations");
        assert!(config.landing.contact.is_some());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "landing: [not, a, map").unwrap();
        assert!(EdrConfig::load(file.path()).is_err());
    }
}
