//! Service configuration

use anyhow::{Context, Result};
use optimizer_engine::input::{DEFAULT_NETWORK_GB, DEFAULT_STORAGE_GB, DEFAULT_VM_HOURS};
use optimizer_engine::pricing::DEFAULT_PROVIDER;
use optimizer_engine::UsageDefaults;
use serde::Deserialize;

/// Service configuration, read from `OPTIMIZER_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listen port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Optional JSON/TOML/YAML pricing table; built-in rates when unset
    #[serde(default)]
    pub pricing_file: Option<String>,

    /// Provider used when a request omits one
    #[serde(default = "default_provider")]
    pub default_provider: String,

    #[serde(default = "default_vm_hours")]
    pub default_vm_hours: f64,

    #[serde(default = "default_storage_gb")]
    pub default_storage_gb: f64,

    #[serde(default = "default_network_gb")]
    pub default_network_gb: f64,
}

fn default_api_port() -> u16 {
    8080
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_vm_hours() -> f64 {
    DEFAULT_VM_HOURS
}

fn default_storage_gb() -> f64 {
    DEFAULT_STORAGE_GB
}

fn default_network_gb() -> f64 {
    DEFAULT_NETWORK_GB
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            pricing_file: None,
            default_provider: default_provider(),
            default_vm_hours: DEFAULT_VM_HOURS,
            default_storage_gb: DEFAULT_STORAGE_GB,
            default_network_gb: DEFAULT_NETWORK_GB,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("OPTIMIZER").try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        let service: Self = config
            .try_deserialize()
            .context("Invalid OPTIMIZER_* configuration")?;

        service.validate()?;
        Ok(service)
    }

    /// Reject usage defaults that request parsing itself would refuse
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("OPTIMIZER_DEFAULT_VM_HOURS", self.default_vm_hours),
            ("OPTIMIZER_DEFAULT_STORAGE_GB", self.default_storage_gb),
            ("OPTIMIZER_DEFAULT_NETWORK_GB", self.default_network_gb),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} must be a finite, non-negative number, got {}", name, value);
            }
        }

        Ok(())
    }

    /// Fallback values for missing or invalid request parameters
    pub fn usage_defaults(&self) -> UsageDefaults {
        UsageDefaults {
            provider: self.default_provider.clone(),
            vm_hours: self.default_vm_hours,
            storage_gb: self.default_storage_gb,
            network_gb: self.default_network_gb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_usage_defaults() {
        let defaults = ServiceConfig::default().usage_defaults();
        assert_eq!(defaults, UsageDefaults::default());
    }

    #[test]
    fn test_custom_vm_hours_default() {
        let config = ServiceConfig {
            default_vm_hours: 0.0,
            ..ServiceConfig::default()
        };
        assert_eq!(config.usage_defaults().vm_hours, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_default_rejected() {
        let config = ServiceConfig {
            default_storage_gb: -1.0,
            ..ServiceConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("OPTIMIZER_DEFAULT_STORAGE_GB"));
    }

    #[test]
    fn test_non_finite_defaults_rejected() {
        for value in [f64::NAN, f64::INFINITY] {
            let config = ServiceConfig {
                default_vm_hours: value,
                ..ServiceConfig::default()
            };
            assert!(config.validate().is_err(), "value={}", value);
        }
    }
}
