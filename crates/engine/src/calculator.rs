//! Linear cost calculation
//!
//! Multiplies each usage magnitude by the provider's per-unit rate.
//! Inputs are not clamped: negative usage yields negative costs.

use std::sync::Arc;

use crate::models::CostBreakdown;
use crate::pricing::PricingTable;

/// Computes itemized cost breakdowns against a shared pricing table
#[derive(Debug, Clone)]
pub struct CostCalculator {
    pricing: Arc<PricingTable>,
}

impl CostCalculator {
    pub fn new(pricing: Arc<PricingTable>) -> Self {
        Self { pricing }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// Calculate the cost breakdown for one provider.
    ///
    /// Unknown providers are priced at the default provider's rates and the
    /// breakdown reports the canonical name that was actually used.
    pub fn calculate(
        &self,
        provider: &str,
        vm_hours: f64,
        storage_gb: f64,
        network_gb: f64,
    ) -> CostBreakdown {
        let resolved = self.pricing.resolve(provider);
        let rates = resolved.rates;

        let vm_cost = vm_hours * rates.vm_rate;
        let storage_cost = storage_gb * rates.storage_rate;
        let network_cost = network_gb * rates.network_rate;

        CostBreakdown {
            provider: resolved.name.to_string(),
            vm_hours,
            storage_gb,
            network_gb,
            vm_cost,
            storage_cost,
            network_cost,
            total: vm_cost + storage_cost + network_cost,
        }
    }
}
