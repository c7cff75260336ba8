//! Provider pricing
//!
//! This module provides:
//! - The immutable per-provider rate table shared by every evaluation
//! - Loading and validation of rate tables from configuration files

mod loader;
mod table;

pub use loader::{PricingConfig, PricingError, ProviderEntry};
pub use table::{PricingTable, ResolvedProvider, DEFAULT_PROVIDER};
