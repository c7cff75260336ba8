//! Multi-cloud cost estimation engine
//!
//! This crate provides:
//! - Provider pricing tables with configurable rates
//! - Linear cost breakdowns and cheapest-provider selection
//! - Simulated resources derived from aggregate usage
//! - Rule-based optimization recommendations
//! - Health checks and observability for the service layer

pub mod best_provider;
pub mod calculator;
pub mod engine;
pub mod health;
pub mod input;
pub mod models;
pub mod observability;
pub mod pricing;
pub mod recommendation;
pub mod simulation;

pub use engine::Engine;
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use input::{ParsedUsage, UsageDefaults, UsageInput};
pub use models::*;
pub use observability::{EngineMetrics, StructuredLogger};
pub use pricing::{PricingConfig, PricingError, PricingTable};
