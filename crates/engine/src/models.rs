//! Core data models for the cost engine

use serde::{Deserialize, Serialize};

/// Per-unit rates for a single cloud provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProviderRates {
    /// Price per VM hour
    pub vm_rate: f64,
    /// Price per GB of storage
    pub storage_rate: f64,
    /// Price per GB of network transfer
    pub network_rate: f64,
}

impl ProviderRates {
    pub const fn new(vm_rate: f64, storage_rate: f64, network_rate: f64) -> Self {
        Self {
            vm_rate,
            storage_rate,
            network_rate,
        }
    }
}

/// Itemized cost for one provider and one set of usage inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub provider: String,
    pub vm_hours: f64,
    pub storage_gb: f64,
    pub network_gb: f64,
    pub vm_cost: f64,
    pub storage_cost: f64,
    pub network_cost: f64,
    /// Always `vm_cost + storage_cost + network_cost`
    pub total: f64,
}

/// Kind of synthetic resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "VM")]
    Vm,
    Storage,
    Network,
    /// Anything the rule table does not know about
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Vm => write!(f, "VM"),
            ResourceType::Storage => write!(f, "Storage"),
            ResourceType::Network => write!(f, "Network"),
            ResourceType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A resource derived from aggregate usage, not a real cloud asset.
///
/// Utilization fields come from step functions over the usage inputs
/// (see [`crate::simulation`]), never from measured telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedResource {
    pub id: String,
    pub resource_type: ResourceType,
    #[serde(default)]
    pub cpu_usage_pct: f64,
    #[serde(default)]
    pub memory_usage_pct: f64,
    #[serde(default)]
    pub storage_usage_pct: f64,
    pub cost_per_month: f64,
}

/// Confidence label assigned by the matched rule branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "Low",
            ConfidenceTier::Medium => "Medium",
            ConfidenceTier::High => "High",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimization suggestion for a single resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub resource_id: String,
    pub text: String,
    pub confidence_tier: ConfidenceTier,
    /// Between zero and the resource's monthly cost
    pub potential_savings: f64,
    pub actions: Vec<String>,
}

/// Full result of one engine evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub breakdown: CostBreakdown,
    pub resources: Vec<SimulatedResource>,
    /// One per resource, same order
    pub recommendations: Vec<Recommendation>,
    pub total_cost: f64,
    pub total_savings: f64,
}

impl Evaluation {
    /// Potential savings as a percentage of total cost
    pub fn savings_percent(&self) -> f64 {
        if self.total_cost > 0.0 {
            self.total_savings / self.total_cost * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_wire_names() {
        assert_eq!(serde_json::to_string(&ResourceType::Vm).unwrap(), "\"VM\"");
        assert_eq!(
            serde_json::to_string(&ResourceType::Storage).unwrap(),
            "\"Storage\""
        );
    }

    #[test]
    fn test_unrecognized_resource_type_deserializes_to_unknown() {
        let json = r#"{"id":"db-1","resource_type":"Database","cost_per_month":10.0}"#;
        let resource: SimulatedResource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.resource_type, ResourceType::Unknown);
        assert_eq!(resource.cpu_usage_pct, 0.0);
    }

    #[test]
    fn test_savings_percent_zero_cost() {
        let evaluation = Evaluation {
            breakdown: CostBreakdown {
                provider: "AWS".to_string(),
                vm_hours: 0.0,
                storage_gb: 0.0,
                network_gb: 0.0,
                vm_cost: 0.0,
                storage_cost: 0.0,
                network_cost: 0.0,
                total: 0.0,
            },
            resources: vec![],
            recommendations: vec![],
            total_cost: 0.0,
            total_savings: 0.0,
        };
        assert_eq!(evaluation.savings_percent(), 0.0);
    }
}
