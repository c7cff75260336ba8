//! CloudOptimizer Pro CLI
//!
//! A command-line tool for estimating monthly cloud costs, comparing
//! providers and reviewing optimization recommendations.

mod backend;
mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{costs, recommendations};
use optimizer_engine::input::params;

use backend::{Backend, UsageParams};

/// CloudOptimizer Pro CLI
#[derive(Parser)]
#[command(name = "cloudopt")]
#[command(author, version, about = "CLI for CloudOptimizer Pro", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via CLOUDOPT_API_URL env var)
    #[arg(long, env = "CLOUDOPT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Evaluate with the in-process engine instead of the API
    #[arg(long, global = true)]
    pub local: bool,

    /// Pricing file (JSON, TOML or YAML) for local evaluation
    #[arg(long, global = true, requires = "local")]
    pub pricing_file: Option<String>,

    /// Output format
    #[arg(long, short, global = true)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Monthly usage figures; omitted or invalid values use the defaults
#[derive(Args, Debug, Default)]
pub struct UsageArgs {
    /// Cloud provider (AWS, Azure, Google or GCP)
    #[arg(long, short)]
    pub provider: Option<String>,

    /// VM hours per month
    #[arg(long, allow_hyphen_values = true)]
    pub vm_hours: Option<String>,

    /// Provisioned storage in GB
    #[arg(long, allow_hyphen_values = true)]
    pub storage_gb: Option<String>,

    /// Network egress in GB
    #[arg(long, allow_hyphen_values = true)]
    pub network_gb: Option<String>,
}

impl UsageArgs {
    /// Collect the given values as raw parameters, filling in the
    /// configured default provider when none was passed
    fn into_params(self, default_provider: Option<&str>) -> UsageParams {
        let provider = self.provider.or_else(|| default_provider.map(str::to_string));

        [
            (params::PROVIDER, provider),
            (params::VM_HOURS, self.vm_hours),
            (params::STORAGE_GB, self.storage_gb),
            (params::NETWORK_GB, self.network_gb),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the monthly cost breakdown for a provider
    Costs(UsageArgs),

    /// List the resources simulated from usage
    Resources(UsageArgs),

    /// Get optimization recommendations
    Recommendations(UsageArgs),

    /// Find the cheapest provider for the usage
    Best(UsageArgs),

    /// Full evaluation report
    Report(UsageArgs),

    /// List provider rates
    Providers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load().unwrap_or_else(|e| {
        output::print_warning(&format!("Ignoring config file: {:#}", e));
        config::Config::default()
    });

    let format = config.format(cli.format);

    let backend = if cli.local {
        if cli.verbose {
            output::print_info("Evaluating with the local engine");
        }
        Backend::local(cli.pricing_file.as_deref())?
    } else {
        let api_url = config.api_url(cli.api_url.as_deref());
        if cli.verbose {
            output::print_info(&format!("Using API at {}", api_url));
        }
        Backend::remote(&api_url)?
    };

    let default_provider = config.default_provider.as_deref();

    match cli.command {
        Commands::Costs(usage) => {
            costs::show_costs(&backend, &usage.into_params(default_provider), format).await?;
        }
        Commands::Resources(usage) => {
            recommendations::list_resources(&backend, &usage.into_params(default_provider), format)
                .await?;
        }
        Commands::Recommendations(usage) => {
            recommendations::list_recommendations(
                &backend,
                &usage.into_params(default_provider),
                format,
            )
            .await?;
        }
        Commands::Best(usage) => {
            costs::show_best_provider(&backend, &usage.into_params(default_provider), format)
                .await?;
        }
        Commands::Report(usage) => {
            recommendations::show_report(&backend, &usage.into_params(default_provider), format)
                .await?;
        }
        Commands::Providers => {
            costs::show_providers(&backend, format).await?;
        }
    }

    Ok(())
}
