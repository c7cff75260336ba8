//! Cheapest-provider selection

use crate::calculator::CostCalculator;
use crate::models::CostBreakdown;

/// Finds the provider with the lowest total for a usage profile
#[derive(Debug, Clone)]
pub struct BestProviderFinder {
    calculator: CostCalculator,
}

impl BestProviderFinder {
    pub fn new(calculator: CostCalculator) -> Self {
        Self { calculator }
    }

    /// Breakdowns for every canonical provider, in enumeration order
    pub fn compare(&self, vm_hours: f64, storage_gb: f64, network_gb: f64) -> Vec<CostBreakdown> {
        self.calculator
            .pricing()
            .providers()
            .map(|(name, _)| {
                self.calculator
                    .calculate(name, vm_hours, storage_gb, network_gb)
            })
            .collect()
    }

    /// The cheapest breakdown.
    ///
    /// Uses a strict `<` while scanning in enumeration order, so on an
    /// exact tie the first-listed provider wins.
    pub fn find_best(&self, vm_hours: f64, storage_gb: f64, network_gb: f64) -> CostBreakdown {
        self.compare(vm_hours, storage_gb, network_gb)
            .into_iter()
            .reduce(|best, candidate| {
                if candidate.total < best.total {
                    candidate
                } else {
                    best
                }
            })
            .unwrap_or_else(|| {
                let default = self.calculator.pricing().default_provider();
                self.calculator
                    .calculate(default, vm_hours, storage_gb, network_gb)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderRates;
    use crate::pricing::PricingTable;
    use std::sync::Arc;

    fn finder(table: PricingTable) -> BestProviderFinder {
        BestProviderFinder::new(CostCalculator::new(Arc::new(table)))
    }

    #[test]
    fn test_storage_heavy_profile_picks_aws() {
        let best = finder(PricingTable::default()).find_best(100.0, 500.0, 100.0);

        assert_eq!(best.provider, "AWS");
        assert!((best.total - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_vm_heavy_profile_picks_azure() {
        let best = finder(PricingTable::default()).find_best(10_000.0, 0.0, 0.0);
        assert_eq!(best.provider, "Azure");
    }

    #[test]
    fn test_best_never_exceeds_any_provider() {
        let finder = finder(PricingTable::default());
        for (vm, storage, network) in [
            (744.0, 100.0, 50.0),
            (0.0, 1000.0, 0.0),
            (0.0, 0.0, 1000.0),
            (1.0, 2.0, 3.0),
        ] {
            let best = finder.find_best(vm, storage, network);
            for other in finder.compare(vm, storage, network) {
                assert!(best.total <= other.total);
            }
        }
    }

    #[test]
    fn test_tie_goes_to_first_listed_provider() {
        let same = ProviderRates::new(0.05, 0.01, 0.02);
        let table = PricingTable::from_parts(
            vec![
                ("AWS".to_string(), same),
                ("Azure".to_string(), same),
                ("Google".to_string(), same),
            ],
            &[],
            "AWS",
        );

        let best = finder(table).find_best(744.0, 100.0, 50.0);
        assert_eq!(best.provider, "AWS");
    }

    #[test]
    fn test_compare_lists_every_provider_once() {
        let comparison = finder(PricingTable::default()).compare(1.0, 1.0, 1.0);
        let names: Vec<_> = comparison.iter().map(|b| b.provider.as_str()).collect();
        assert_eq!(names, vec!["AWS", "Azure", "Google"]);
    }

    #[test]
    fn test_zero_usage_ties_resolve_to_first() {
        let best = finder(PricingTable::default()).find_best(0.0, 0.0, 0.0);
        assert_eq!(best.provider, "AWS");
        assert_eq!(best.total, 0.0);
    }
}
