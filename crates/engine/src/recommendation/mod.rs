//! Rule-based optimization recommendations
//!
//! Maps each simulated resource to exactly one branch of a fixed decision
//! table. The confidence tier is the label of the matched branch, not a
//! statistical estimate.

pub mod rules;

use crate::models::{Recommendation, ResourceType, SimulatedResource};
use rules::Rule;

/// Network monthly cost above which egress is considered expensive
pub const NETWORK_HIGH_COST_THRESHOLD: f64 = 50.0;
/// Network monthly cost above which egress is worth trimming
pub const NETWORK_MODERATE_COST_THRESHOLD: f64 = 20.0;

/// Stateless recommendation generator
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Pick the rule branch for a resource
    pub fn select_rule(&self, resource: &SimulatedResource) -> &'static Rule {
        match resource.resource_type {
            ResourceType::Vm => vm_rule(resource.cpu_usage_pct),
            ResourceType::Storage => storage_rule(resource.storage_usage_pct),
            ResourceType::Network => network_rule(resource.cost_per_month),
            ResourceType::Unknown => &rules::MANUAL_REVIEW,
        }
    }

    /// Generate the recommendation for a single resource
    pub fn recommend(&self, resource: &SimulatedResource) -> Recommendation {
        let rule = self.select_rule(resource);

        Recommendation {
            resource_id: resource.id.clone(),
            text: rule.text.to_string(),
            confidence_tier: rule.confidence,
            potential_savings: savings(rule.savings_fraction, resource.cost_per_month),
            actions: rule.actions.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Generate one recommendation per resource, preserving order
    pub fn recommend_all(&self, resources: &[SimulatedResource]) -> Vec<Recommendation> {
        resources.iter().map(|r| self.recommend(r)).collect()
    }
}

fn vm_rule(cpu: f64) -> &'static Rule {
    if cpu < 10.0 {
        &rules::VM_SEVERELY_UNDERUTILIZED
    } else if cpu < 30.0 {
        &rules::VM_UNDERUTILIZED
    } else if cpu < 60.0 {
        &rules::VM_MODERATELY_UTILIZED
    } else if cpu > 80.0 {
        &rules::VM_HIGHLY_UTILIZED
    } else {
        &rules::VM_OPTIMAL
    }
}

fn storage_rule(usage: f64) -> &'static Rule {
    if usage > 90.0 {
        &rules::STORAGE_NEARLY_FULL
    } else if usage < 40.0 {
        &rules::STORAGE_UNDERUTILIZED
    } else if usage > 70.0 {
        &rules::STORAGE_HIGH_USAGE
    } else {
        &rules::STORAGE_OPTIMAL
    }
}

fn network_rule(cost: f64) -> &'static Rule {
    if cost > NETWORK_HIGH_COST_THRESHOLD {
        &rules::NETWORK_HIGH_COST
    } else if cost > NETWORK_MODERATE_COST_THRESHOLD {
        &rules::NETWORK_MODERATE_COST
    } else {
        &rules::NETWORK_OPTIMAL
    }
}

/// Savings for a branch, bounded to `[0, cost]`.
///
/// Non-positive or non-finite costs save nothing.
fn savings(fraction: f64, cost: f64) -> f64 {
    if !cost.is_finite() || cost <= 0.0 {
        return 0.0;
    }
    (fraction * cost).clamp(0.0, cost)
}
