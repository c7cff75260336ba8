//! Cost-related CLI commands

use anyhow::Result;
use colored::Colorize;
use optimizer_engine::CostBreakdown;
use tabled::Tabled;

use crate::backend::{Backend, UsageParams};
use crate::output::{format_currency, format_rate, print_json, render_table, OutputFormat};

/// Row for provider comparison table
#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "VM")]
    vm_cost: String,
    #[tabled(rename = "Storage")]
    storage_cost: String,
    #[tabled(rename = "Network")]
    network_cost: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// Row for provider rate table
#[derive(Tabled)]
struct RateRow {
    #[tabled(rename = "Provider")]
    name: String,
    #[tabled(rename = "VM / hour")]
    vm_rate: String,
    #[tabled(rename = "Storage / GB")]
    storage_rate: String,
    #[tabled(rename = "Network / GB")]
    network_rate: String,
    #[tabled(rename = "Aliases")]
    aliases: String,
}

/// Print a single cost breakdown
pub(crate) fn print_breakdown(breakdown: &CostBreakdown) {
    println!("{}", "Cost Breakdown".bold());
    println!("{}", "=".repeat(50));
    println!("Provider:               {}", breakdown.provider.cyan());
    println!();

    println!("{}", "Usage".bold());
    println!("{}", "-".repeat(50));
    println!("VM hours:               {}", breakdown.vm_hours);
    println!("Storage (GB):           {}", breakdown.storage_gb);
    println!("Network egress (GB):    {}", breakdown.network_gb);
    println!();

    println!("{}", "Monthly Costs".bold());
    println!("{}", "-".repeat(50));
    println!("VM:                     {}", format_currency(breakdown.vm_cost));
    println!("Storage:                {}", format_currency(breakdown.storage_cost));
    println!("Network:                {}", format_currency(breakdown.network_cost));
    println!(
        "{}                  {}",
        "Total:".bold(),
        format_currency(breakdown.total).bold()
    );
}

/// Show the cost breakdown for one provider
pub async fn show_costs(backend: &Backend, params: &UsageParams, format: OutputFormat) -> Result<()> {
    let breakdown = backend.costs(params).await?;

    match format {
        OutputFormat::Json => print_json(&breakdown)?,
        OutputFormat::Table => print_breakdown(&breakdown),
    }

    Ok(())
}

/// Compare every provider and highlight the cheapest
pub async fn show_best_provider(
    backend: &Backend,
    params: &UsageParams,
    format: OutputFormat,
) -> Result<()> {
    let result = backend.best_provider(params).await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            let rows: Vec<ComparisonRow> = result
                .comparison
                .iter()
                .map(|b| {
                    let provider = if b.provider == result.best.provider {
                        format!("{} *", b.provider).green().bold().to_string()
                    } else {
                        b.provider.clone()
                    };
                    ComparisonRow {
                        provider,
                        vm_cost: format_currency(b.vm_cost),
                        storage_cost: format_currency(b.storage_cost),
                        network_cost: format_currency(b.network_cost),
                        total: format_currency(b.total),
                    }
                })
                .collect();

            println!("{}", render_table(rows));
            println!(
                "\n{} {} at {}",
                "Best provider:".bold(),
                result.best.provider.green().bold(),
                format_currency(result.best.total).green()
            );
        }
    }

    Ok(())
}

/// List provider rates
pub async fn show_providers(backend: &Backend, format: OutputFormat) -> Result<()> {
    let pricing = backend.providers().await?;

    match format {
        OutputFormat::Json => print_json(&pricing)?,
        OutputFormat::Table => {
            let rows: Vec<RateRow> = pricing
                .providers
                .iter()
                .map(|p| RateRow {
                    name: if p.name == pricing.default_provider {
                        format!("{} (default)", p.name)
                    } else {
                        p.name.clone()
                    },
                    vm_rate: format_rate(p.vm_rate),
                    storage_rate: format_rate(p.storage_rate),
                    network_rate: format_rate(p.network_rate),
                    aliases: if p.aliases.is_empty() {
                        "-".to_string()
                    } else {
                        p.aliases.join(", ")
                    },
                })
                .collect();

            println!("{}", render_table(rows));
        }
    }

    Ok(())
}
