//! Pricing table configuration
//!
//! Rate tables can be supplied as JSON, TOML or YAML files. The file
//! format is picked from the extension.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::table::{PricingTable, DEFAULT_PROVIDER};
use crate::models::ProviderRates;

/// Errors raised while loading or validating a pricing configuration
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("failed to load pricing file: {0}")]
    Load(#[from] config::ConfigError),

    #[error("pricing table has no providers")]
    Empty,

    #[error("provider or alias '{0}' is defined more than once")]
    Duplicate(String),

    #[error("default provider '{0}' is not in the pricing table")]
    UnknownDefault(String),

    #[error("provider '{provider}' has invalid {field} rate {value}")]
    InvalidRate {
        provider: String,
        field: &'static str,
        value: f64,
    },
}

/// One provider row of a pricing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub name: String,
    pub vm_rate: f64,
    pub storage_rate: f64,
    pub network_rate: f64,
    /// Alternative names resolving to this provider
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Serializable description of a [`PricingTable`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_provider")]
    pub default_provider: String,
    pub providers: Vec<ProviderEntry>,
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig::from(&PricingTable::default())
    }
}

impl From<&PricingTable> for PricingConfig {
    fn from(table: &PricingTable) -> Self {
        let providers = table
            .providers()
            .map(|(name, rates)| ProviderEntry {
                name: name.to_string(),
                vm_rate: rates.vm_rate,
                storage_rate: rates.storage_rate,
                network_rate: rates.network_rate,
                aliases: table.aliases_of(name),
            })
            .collect();

        Self {
            default_provider: table.default_provider().to_string(),
            providers,
        }
    }
}

impl PricingConfig {
    /// Load a pricing configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PricingError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate and build the immutable table
    pub fn build(&self) -> Result<PricingTable, PricingError> {
        if self.providers.is_empty() {
            return Err(PricingError::Empty);
        }

        let mut seen = HashSet::new();
        for entry in &self.providers {
            if !seen.insert(entry.name.as_str()) {
                return Err(PricingError::Duplicate(entry.name.clone()));
            }
            validate_rate(&entry.name, "vm", entry.vm_rate)?;
            validate_rate(&entry.name, "storage", entry.storage_rate)?;
            validate_rate(&entry.name, "network", entry.network_rate)?;
        }

        let mut aliases = Vec::new();
        for entry in &self.providers {
            for alias in &entry.aliases {
                if !seen.insert(alias.as_str()) {
                    return Err(PricingError::Duplicate(alias.clone()));
                }
                aliases.push((alias.clone(), entry.name.clone()));
            }
        }

        if !self.providers.iter().any(|e| e.name == self.default_provider) {
            return Err(PricingError::UnknownDefault(self.default_provider.clone()));
        }

        let providers = self
            .providers
            .iter()
            .map(|e| {
                (
                    e.name.clone(),
                    ProviderRates::new(e.vm_rate, e.storage_rate, e.network_rate),
                )
            })
            .collect();

        Ok(PricingTable::from_parts(
            providers,
            &aliases,
            &self.default_provider,
        ))
    }
}

fn validate_rate(provider: &str, field: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidRate {
            provider: provider.to_string(),
            field,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn entry(name: &str, vm: f64) -> ProviderEntry {
        ProviderEntry {
            name: name.to_string(),
            vm_rate: vm,
            storage_rate: 0.01,
            network_rate: 0.02,
            aliases: vec![],
        }
    }

    #[test]
    fn test_default_config_matches_builtin_table() {
        let config = PricingConfig::default();
        let table = config.build().unwrap();
        let builtin = PricingTable::default();

        for (name, rates) in builtin.providers() {
            assert_eq!(table.rates(name), rates);
        }
        assert_eq!(table.default_provider(), "AWS");
        assert!(table.contains("GCP"));
    }

    #[test]
    fn test_empty_config_rejected() {
        let config = PricingConfig {
            default_provider: "AWS".to_string(),
            providers: vec![],
        };
        assert!(matches!(config.build(), Err(PricingError::Empty)));
    }

    #[test]
    fn test_duplicate_provider_rejected() {
        let config = PricingConfig {
            default_provider: "AWS".to_string(),
            providers: vec![entry("AWS", 0.05), entry("AWS", 0.06)],
        };
        assert!(matches!(config.build(), Err(PricingError::Duplicate(name)) if name == "AWS"));
    }

    #[test]
    fn test_alias_clashing_with_provider_rejected() {
        let mut azure = entry("Azure", 0.04);
        azure.aliases = vec!["AWS".to_string()];
        let config = PricingConfig {
            default_provider: "AWS".to_string(),
            providers: vec![entry("AWS", 0.05), azure],
        };
        assert!(matches!(config.build(), Err(PricingError::Duplicate(_))));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let config = PricingConfig {
            default_provider: "AWS".to_string(),
            providers: vec![entry("AWS", -0.05)],
        };
        assert!(matches!(
            config.build(),
            Err(PricingError::InvalidRate { field: "vm", .. })
        ));
    }

    #[test]
    fn test_nan_rate_rejected() {
        let config = PricingConfig {
            default_provider: "AWS".to_string(),
            providers: vec![entry("AWS", f64::NAN)],
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn test_unknown_default_rejected() {
        let config = PricingConfig {
            default_provider: "Oracle".to_string(),
            providers: vec![entry("AWS", 0.05)],
        };
        assert!(matches!(config.build(), Err(PricingError::UnknownDefault(_))));
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
                "default_provider": "Azure",
                "providers": [
                    {{ "name": "AWS", "vm_rate": 0.05, "storage_rate": 0.01, "network_rate": 0.02 }},
                    {{ "name": "Azure", "vm_rate": 0.042, "storage_rate": 0.015, "network_rate": 0.018, "aliases": ["MSFT"] }}
                ]
            }}"#
        )
        .unwrap();

        let table = PricingConfig::load(file.path()).unwrap().build().unwrap();
        assert_eq!(table.default_provider(), "Azure");
        assert_eq!(table.rates("MSFT"), ProviderRates::new(0.042, 0.015, 0.018));
        assert_eq!(table.resolve("Nope").name, "Azure");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[[providers]]
name = "AWS"
vm_rate = 1
storage_rate = 0.01
network_rate = 0.02

[[providers]]
name = "Google"
vm_rate = 0.048
storage_rate = 0.011
network_rate = 0.025
aliases = ["GCP"]
"#
        )
        .unwrap();

        let table = PricingConfig::load(file.path()).unwrap().build().unwrap();
        assert_eq!(table.default_provider(), "AWS");
        assert_eq!(table.rates("AWS"), ProviderRates::new(1.0, 0.01, 0.02));
        assert_eq!(table.resolve("GCP").name, "Google");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = PricingConfig::load("/nonexistent/pricing.toml");
        assert!(matches!(result, Err(PricingError::Load(_))));
    }
}
