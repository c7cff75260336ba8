//! Single entry point tying the pricing, simulation and recommendation
//! stages together

use std::sync::Arc;

use crate::best_provider::BestProviderFinder;
use crate::calculator::CostCalculator;
use crate::input::UsageInput;
use crate::models::{CostBreakdown, Evaluation, Recommendation, SimulatedResource};
use crate::pricing::PricingTable;
use crate::recommendation::RecommendationEngine;
use crate::simulation::ResourceSynthesizer;

/// Stateless cost and recommendation engine.
///
/// Cloning is cheap; every clone shares the same pricing table.
#[derive(Debug, Clone)]
pub struct Engine {
    calculator: CostCalculator,
    synthesizer: ResourceSynthesizer,
    recommender: RecommendationEngine,
    finder: BestProviderFinder,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Arc::new(PricingTable::default()))
    }
}

impl Engine {
    pub fn new(pricing: Arc<PricingTable>) -> Self {
        let calculator = CostCalculator::new(pricing);

        Self {
            synthesizer: ResourceSynthesizer::new(calculator.clone()),
            finder: BestProviderFinder::new(calculator.clone()),
            recommender: RecommendationEngine::new(),
            calculator,
        }
    }

    pub fn pricing(&self) -> &PricingTable {
        self.calculator.pricing()
    }

    /// Evaluate one usage profile end to end
    pub fn evaluate(&self, input: &UsageInput) -> Evaluation {
        let breakdown = self.calculate(input);
        let resources = self.synthesize(input);
        let recommendations = self.recommender.recommend_all(&resources);

        let total_cost: f64 = resources.iter().map(|r| r.cost_per_month).sum();
        let total_savings: f64 = recommendations.iter().map(|r| r.potential_savings).sum();

        Evaluation {
            breakdown,
            resources,
            recommendations,
            total_cost,
            total_savings,
        }
    }

    pub fn calculate(&self, input: &UsageInput) -> CostBreakdown {
        self.calculator.calculate(
            &input.provider,
            input.vm_hours,
            input.storage_gb,
            input.network_gb,
        )
    }

    pub fn synthesize(&self, input: &UsageInput) -> Vec<SimulatedResource> {
        self.synthesizer.synthesize(
            &input.provider,
            input.vm_hours,
            input.storage_gb,
            input.network_gb,
        )
    }

    pub fn recommend(&self, resource: &SimulatedResource) -> Recommendation {
        self.recommender.recommend(resource)
    }

    /// Cheapest provider for the usage in `input`; its provider is ignored
    pub fn find_best(&self, input: &UsageInput) -> CostBreakdown {
        self.finder
            .find_best(input.vm_hours, input.storage_gb, input.network_gb)
    }

    /// Every provider's breakdown for the usage in `input`
    pub fn compare_providers(&self, input: &UsageInput) -> Vec<CostBreakdown> {
        self.finder
            .compare(input.vm_hours, input.storage_gb, input.network_gb)
    }
}
