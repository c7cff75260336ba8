//! Simulated resource synthesis
//!
//! There is no telemetry behind these resources. Utilization is a step
//! function of the usage magnitudes, kept here under an explicit name so
//! that nothing mistakes it for measured data.

use crate::calculator::CostCalculator;
use crate::models::{ResourceType, SimulatedResource};

/// VM hours above which the VM is simulated as heavily used
pub const VM_HEAVY_HOURS: f64 = 500.0;
/// VM hours above which the VM is simulated as moderately used
pub const VM_MODERATE_HOURS: f64 = 200.0;

/// Storage GB above which storage is simulated as nearly full
pub const STORAGE_LARGE_GB: f64 = 200.0;
/// Storage GB above which storage is simulated as half used
pub const STORAGE_MEDIUM_GB: f64 = 50.0;

/// Simulated CPU and memory utilization for a VM
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VmUtilization {
    pub cpu_pct: f64,
    pub memory_pct: f64,
}

/// Simulated VM utilization from total VM hours
pub fn simulate_vm_utilization(vm_hours: f64) -> VmUtilization {
    if vm_hours > VM_HEAVY_HOURS {
        VmUtilization {
            cpu_pct: 85.0,
            memory_pct: 78.0,
        }
    } else if vm_hours > VM_MODERATE_HOURS {
        VmUtilization {
            cpu_pct: 45.0,
            memory_pct: 52.0,
        }
    } else {
        VmUtilization {
            cpu_pct: 15.0,
            memory_pct: 25.0,
        }
    }
}

/// Simulated storage utilization percentage from stored GB
pub fn simulate_storage_utilization(storage_gb: f64) -> f64 {
    if storage_gb > STORAGE_LARGE_GB {
        85.0
    } else if storage_gb > STORAGE_MEDIUM_GB {
        60.0
    } else {
        35.0
    }
}

/// Builds simulated resources from aggregate usage
#[derive(Debug, Clone)]
pub struct ResourceSynthesizer {
    calculator: CostCalculator,
}

impl ResourceSynthesizer {
    pub fn new(calculator: CostCalculator) -> Self {
        Self { calculator }
    }

    /// Synthesize up to three resources, in VM, Storage, Network order.
    ///
    /// A resource is emitted only when its usage magnitude is positive.
    /// Each resource's monthly cost is the matching breakdown component.
    pub fn synthesize(
        &self,
        provider: &str,
        vm_hours: f64,
        storage_gb: f64,
        network_gb: f64,
    ) -> Vec<SimulatedResource> {
        let breakdown = self
            .calculator
            .calculate(provider, vm_hours, storage_gb, network_gb);
        let prefix = breakdown.provider.to_lowercase();
        let mut resources = Vec::with_capacity(3);

        if vm_hours > 0.0 {
            let util = simulate_vm_utilization(vm_hours);
            resources.push(SimulatedResource {
                id: format!("{}-vm", prefix),
                resource_type: ResourceType::Vm,
                cpu_usage_pct: util.cpu_pct,
                memory_usage_pct: util.memory_pct,
                storage_usage_pct: 0.0,
                cost_per_month: breakdown.vm_cost,
            });
        }

        if storage_gb > 0.0 {
            resources.push(SimulatedResource {
                id: format!("{}-storage", prefix),
                resource_type: ResourceType::Storage,
                cpu_usage_pct: 0.0,
                memory_usage_pct: 0.0,
                storage_usage_pct: simulate_storage_utilization(storage_gb),
                cost_per_month: breakdown.storage_cost,
            });
        }

        if network_gb > 0.0 {
            resources.push(SimulatedResource {
                id: format!("{}-network", prefix),
                resource_type: ResourceType::Network,
                cpu_usage_pct: 0.0,
                memory_usage_pct: 0.0,
                storage_usage_pct: 0.0,
                cost_per_month: breakdown.network_cost,
            });
        }

        resources
    }
}
