//! Provider rate table
//!
//! Maps provider names to per-unit rates. Unknown names resolve to the
//! default provider instead of failing.

use std::collections::HashMap;

use crate::models::ProviderRates;

/// Provider used when a lookup does not match any entry
pub const DEFAULT_PROVIDER: &str = "AWS";

/// Built-in rates, in enumeration order
const BUILTIN_RATES: &[(&str, ProviderRates)] = &[
    ("AWS", ProviderRates::new(0.05, 0.01, 0.02)),
    ("Azure", ProviderRates::new(0.045, 0.012, 0.016)),
    ("Google", ProviderRates::new(0.048, 0.011, 0.025)),
];

const BUILTIN_ALIASES: &[(&str, &str)] = &[("GCP", "Google")];

/// Result of resolving a provider name against the table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedProvider<'a> {
    /// Canonical provider name
    pub name: &'a str,
    pub rates: ProviderRates,
    /// True when the requested name was unknown and the default was used
    pub fallback: bool,
}

/// Immutable provider rate table
///
/// Built once at startup and shared read-only across requests.
#[derive(Debug, Clone)]
pub struct PricingTable {
    providers: Vec<(String, ProviderRates)>,
    /// Canonical names and aliases, mapped to an index into `providers`
    index: HashMap<String, usize>,
    default_index: usize,
}

impl Default for PricingTable {
    fn default() -> Self {
        let providers = BUILTIN_RATES
            .iter()
            .map(|(name, rates)| (name.to_string(), *rates))
            .collect();
        let aliases = BUILTIN_ALIASES
            .iter()
            .map(|(alias, target)| (alias.to_string(), target.to_string()))
            .collect::<Vec<_>>();

        Self::from_parts(providers, &aliases, DEFAULT_PROVIDER)
    }
}

impl PricingTable {
    /// Assemble a table from entries that have already been validated.
    ///
    /// Aliases pointing at unknown providers are skipped, and an unknown
    /// default falls back to the first entry.
    pub(crate) fn from_parts(
        providers: Vec<(String, ProviderRates)>,
        aliases: &[(String, String)],
        default_provider: &str,
    ) -> Self {
        let mut index: HashMap<String, usize> = providers
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();

        for (alias, target) in aliases {
            if let Some(&i) = index.get(target) {
                index.entry(alias.clone()).or_insert(i);
            }
        }

        let default_index = index.get(default_provider).copied().unwrap_or(0);

        Self {
            providers,
            index,
            default_index,
        }
    }

    /// Rates for a provider, or the default provider's rates if unknown
    pub fn rates(&self, provider: &str) -> ProviderRates {
        self.resolve(provider).rates
    }

    /// Resolve a provider name (case-sensitive) to its canonical entry
    pub fn resolve(&self, provider: &str) -> ResolvedProvider<'_> {
        let (i, fallback) = match self.index.get(provider) {
            Some(&i) => (i, false),
            None => (self.default_index, true),
        };
        let (name, rates) = &self.providers[i];

        ResolvedProvider {
            name,
            rates: *rates,
            fallback,
        }
    }

    /// Canonical providers in enumeration order
    pub fn providers(&self) -> impl Iterator<Item = (&str, ProviderRates)> + '_ {
        self.providers
            .iter()
            .map(|(name, rates)| (name.as_str(), *rates))
    }

    /// Name of the provider unknown lookups resolve to
    pub fn default_provider(&self) -> &str {
        &self.providers[self.default_index].0
    }

    /// Aliases registered for a canonical provider, sorted
    pub fn aliases_of(&self, provider: &str) -> Vec<String> {
        let Some(&target) = self.index.get(provider) else {
            return Vec::new();
        };
        let mut aliases: Vec<String> = self
            .index
            .iter()
            .filter(|&(name, &i)| i == target && self.providers[i].0 != *name)
            .map(|(name, _)| name.clone())
            .collect();
        aliases.sort();
        aliases
    }

    /// Returns true if the name or alias is present in the table
    pub fn contains(&self, provider: &str) -> bool {
        self.index.contains_key(provider)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
