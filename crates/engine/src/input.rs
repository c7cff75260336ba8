//! Usage inputs and boundary parsing
//!
//! Request handlers and the CLI hand the engine raw string parameters.
//! Anything missing, unparseable, non-finite or negative is replaced by the
//! configured default instead of surfacing an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::pricing::DEFAULT_PROVIDER;

/// Default VM hours: one month of continuous runtime
pub const DEFAULT_VM_HOURS: f64 = 744.0;
pub const DEFAULT_STORAGE_GB: f64 = 100.0;
pub const DEFAULT_NETWORK_GB: f64 = 50.0;

/// Engine inputs for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageInput {
    pub provider: String,
    pub vm_hours: f64,
    pub storage_gb: f64,
    pub network_gb: f64,
}

/// Values substituted for missing or invalid parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageDefaults {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_vm_hours")]
    pub vm_hours: f64,
    #[serde(default = "default_storage_gb")]
    pub storage_gb: f64,
    #[serde(default = "default_network_gb")]
    pub network_gb: f64,
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

impl Default for UsageDefaults {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            vm_hours: DEFAULT_VM_HOURS,
            storage_gb: DEFAULT_STORAGE_GB,
            network_gb: DEFAULT_NETWORK_GB,
        }
    }
}

impl From<&UsageDefaults> for UsageInput {
    fn from(defaults: &UsageDefaults) -> Self {
        Self {
            provider: defaults.provider.clone(),
            vm_hours: defaults.vm_hours,
            storage_gb: defaults.storage_gb,
            network_gb: defaults.network_gb,
        }
    }
}

/// Parameter names; each is also accepted in camelCase
pub mod params {
    pub const PROVIDER: &str = "provider";
    pub const VM_HOURS: &str = "vm_hours";
    pub const STORAGE_GB: &str = "storage_gb";
    pub const NETWORK_GB: &str = "network_gb";
}

/// Parsed input plus the names of fields that fell back to defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUsage {
    pub input: UsageInput,
    pub defaulted: Vec<&'static str>,
}

impl UsageInput {
    pub fn new(provider: impl Into<String>, vm_hours: f64, storage_gb: f64, network_gb: f64) -> Self {
        Self {
            provider: provider.into(),
            vm_hours,
            storage_gb,
            network_gb,
        }
    }

    /// Build an input from raw string parameters.
    ///
    /// A field that is present but empty, unparseable, non-finite or
    /// negative counts as defaulted. Absent fields are defaulted silently.
    pub fn from_params(query: &HashMap<String, String>, defaults: &UsageDefaults) -> ParsedUsage {
        let mut defaulted = Vec::new();

        let provider = match lookup(query, params::PROVIDER, "provider") {
            Some(p) if !p.trim().is_empty() => p.trim().to_string(),
            Some(_) => {
                defaulted.push(params::PROVIDER);
                defaults.provider.clone()
            }
            None => defaults.provider.clone(),
        };

        let mut number = |key: &'static str, camel: &str, fallback: f64| -> f64 {
            match lookup(query, key, camel) {
                Some(raw) => match parse_usage(raw) {
                    Some(value) => value,
                    None => {
                        defaulted.push(key);
                        fallback
                    }
                },
                None => fallback,
            }
        };

        let vm_hours = number(params::VM_HOURS, "vmHours", defaults.vm_hours);
        let storage_gb = number(params::STORAGE_GB, "storageGB", defaults.storage_gb);
        let network_gb = number(params::NETWORK_GB, "networkGB", defaults.network_gb);

        ParsedUsage {
            input: UsageInput {
                provider,
                vm_hours,
                storage_gb,
                network_gb,
            },
            defaulted,
        }
    }
}

fn lookup<'a>(query: &'a HashMap<String, String>, key: &str, camel: &str) -> Option<&'a str> {
    query
        .get(key)
        .or_else(|| query.get(camel))
        .map(String::as_str)
}

/// Parse a usage magnitude; rejects non-finite and negative values
pub fn parse_usage(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
