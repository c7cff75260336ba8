//! Rule branches of the recommendation decision table

use crate::models::ConfidenceTier;

/// One branch of the decision table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub text: &'static str,
    pub confidence: ConfidenceTier,
    /// Fraction of monthly cost reported as potential savings
    pub savings_fraction: f64,
    pub actions: &'static [&'static str],
}

// VM branches, keyed on CPU utilization

pub const VM_SEVERELY_UNDERUTILIZED: Rule = Rule {
    text: "VM is severely underutilized. Downsize or terminate it.",
    confidence: ConfidenceTier::High,
    savings_fraction: 0.7,
    actions: &[
        "Downsize to smaller instance",
        "Consider terminating if unused",
        "Use spot instances",
    ],
};

pub const VM_UNDERUTILIZED: Rule = Rule {
    text: "VM is underutilized. A smaller instance type would cover the load.",
    confidence: ConfidenceTier::High,
    savings_fraction: 0.4,
    actions: &[
        "Downsize to smaller instance",
        "Use spot instances",
        "Enable auto-scaling",
    ],
};

pub const VM_MODERATELY_UTILIZED: Rule = Rule {
    text: "VM is moderately utilized. Commit to reserved capacity for a lower rate.",
    confidence: ConfidenceTier::Medium,
    savings_fraction: 0.15,
    actions: &["Purchase reserved instances", "Enable auto-scaling"],
};

pub const VM_HIGHLY_UTILIZED: Rule = Rule {
    text: "VM is highly utilized. Scale up for performance.",
    confidence: ConfidenceTier::High,
    savings_fraction: 0.0,
    actions: &[
        "Upgrade to larger instance",
        "Enable auto-scaling",
        "Add load balancing",
    ],
};

pub const VM_OPTIMAL: Rule = Rule {
    text: "VM is optimally utilized.",
    confidence: ConfidenceTier::Low,
    savings_fraction: 0.0,
    actions: &["Maintain current configuration", "Monitor utilization trends"],
};

// Storage branches, keyed on storage utilization

pub const STORAGE_NEARLY_FULL: Rule = Rule {
    text: "Storage is nearly full. Expand capacity before it runs out.",
    confidence: ConfidenceTier::High,
    savings_fraction: 0.0,
    actions: &["Increase storage capacity", "Clean up unused data"],
};

pub const STORAGE_UNDERUTILIZED: Rule = Rule {
    text: "Storage is underutilized. Shrink the volume or move data to a cheaper tier.",
    confidence: ConfidenceTier::Medium,
    savings_fraction: 0.3,
    actions: &[
        "Reduce provisioned storage",
        "Move to infrequent access tier",
        "Enable lifecycle policies",
    ],
};

pub const STORAGE_HIGH_USAGE: Rule = Rule {
    text: "Storage usage is high. Archive cold data to a cheaper tier.",
    confidence: ConfidenceTier::Low,
    savings_fraction: 0.1,
    actions: &["Archive old data", "Enable compression"],
};

pub const STORAGE_OPTIMAL: Rule = Rule {
    text: "Storage is optimally utilized.",
    confidence: ConfidenceTier::Low,
    savings_fraction: 0.0,
    actions: &["Maintain current configuration"],
};

// Network branches, keyed on monthly cost

pub const NETWORK_HIGH_COST: Rule = Rule {
    text: "Network transfer costs are high. Cache content closer to users.",
    confidence: ConfidenceTier::Medium,
    savings_fraction: 0.25,
    actions: &[
        "Use a CDN for static content",
        "Enable response compression",
        "Keep traffic within one region",
    ],
};

pub const NETWORK_MODERATE_COST: Rule = Rule {
    text: "Network transfer costs are moderate. Compress payloads to trim egress.",
    confidence: ConfidenceTier::Low,
    savings_fraction: 0.1,
    actions: &["Enable response compression", "Review data transfer patterns"],
};

pub const NETWORK_OPTIMAL: Rule = Rule {
    text: "Network costs are within normal range.",
    confidence: ConfidenceTier::Low,
    savings_fraction: 0.0,
    actions: &["Monitor data transfer"],
};

pub const MANUAL_REVIEW: Rule = Rule {
    text: "Manual review recommended",
    confidence: ConfidenceTier::Low,
    savings_fraction: 0.0,
    actions: &["manual analysis required"],
};
