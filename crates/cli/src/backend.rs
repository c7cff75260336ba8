//! Where evaluations run: the remote pricing service or the local engine

use anyhow::{Context, Result};
use optimizer_engine::{CostBreakdown, Engine, PricingConfig, PricingTable, UsageDefaults, UsageInput};
use std::collections::HashMap;
use std::sync::Arc;

use crate::client::{ApiClient, BestProvider, EvaluationReport, RecommendationList, ResourceList};

/// Raw usage parameters, passed to the API as query parameters or parsed
/// locally with the same fallback rules
pub type UsageParams = Vec<(String, String)>;

pub enum Backend {
    Remote(ApiClient),
    Local {
        engine: Engine,
        defaults: UsageDefaults,
    },
}

impl Backend {
    pub fn remote(api_url: &str) -> Result<Self> {
        Ok(Backend::Remote(ApiClient::new(api_url)?))
    }

    /// In-process engine, optionally with rates from a pricing file
    pub fn local(pricing_file: Option<&str>) -> Result<Self> {
        let table = match pricing_file {
            Some(path) => PricingConfig::load(path)
                .and_then(|c| c.build())
                .with_context(|| format!("Failed to load pricing file {}", path))?,
            None => PricingTable::default(),
        };

        Ok(Backend::Local {
            engine: Engine::new(Arc::new(table)),
            defaults: UsageDefaults::default(),
        })
    }

    fn local_input(params: &UsageParams, defaults: &UsageDefaults) -> UsageInput {
        let query: HashMap<String, String> = params.iter().cloned().collect();
        UsageInput::from_params(&query, defaults).input
    }

    pub async fn costs(&self, params: &UsageParams) -> Result<CostBreakdown> {
        match self {
            Backend::Remote(client) => client.get("api/v1/costs", params).await,
            Backend::Local { engine, defaults } => {
                Ok(engine.calculate(&Self::local_input(params, defaults)))
            }
        }
    }

    pub async fn evaluate(&self, params: &UsageParams) -> Result<EvaluationReport> {
        match self {
            Backend::Remote(client) => client.get("api/v1/evaluate", params).await,
            Backend::Local { engine, defaults } => {
                let evaluation = engine.evaluate(&Self::local_input(params, defaults));
                Ok(EvaluationReport {
                    savings_percent: evaluation.savings_percent(),
                    evaluation,
                    generated_at: Some(chrono::Utc::now().to_rfc3339()),
                })
            }
        }
    }

    pub async fn resources(&self, params: &UsageParams) -> Result<ResourceList> {
        match self {
            Backend::Remote(client) => client.get("api/v1/resources", params).await,
            Backend::Local { .. } => {
                let report = self.evaluate(params).await?;
                Ok(ResourceList {
                    resources: report.evaluation.resources,
                    total_cost: report.evaluation.total_cost,
                })
            }
        }
    }

    pub async fn recommendations(&self, params: &UsageParams) -> Result<RecommendationList> {
        match self {
            Backend::Remote(client) => client.get("api/v1/recommendations", params).await,
            Backend::Local { .. } => {
                let report = self.evaluate(params).await?;
                Ok(RecommendationList {
                    recommendations: report.evaluation.recommendations,
                    total_savings: report.evaluation.total_savings,
                })
            }
        }
    }

    pub async fn best_provider(&self, params: &UsageParams) -> Result<BestProvider> {
        match self {
            Backend::Remote(client) => client.get("api/v1/best-provider", params).await,
            Backend::Local { engine, defaults } => {
                let input = Self::local_input(params, defaults);
                Ok(BestProvider {
                    best: engine.find_best(&input),
                    comparison: engine.compare_providers(&input),
                })
            }
        }
    }

    pub async fn providers(&self) -> Result<PricingConfig> {
        match self {
            Backend::Remote(client) => client.get("api/v1/providers", &[]).await,
            Backend::Local { engine, .. } => Ok(PricingConfig::from(engine.pricing())),
        }
    }
}
