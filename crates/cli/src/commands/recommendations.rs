//! Resource and recommendation CLI commands

use anyhow::Result;
use colored::Colorize;
use optimizer_engine::{Recommendation, SimulatedResource};
use tabled::Tabled;

use crate::backend::{Backend, UsageParams};
use crate::commands::costs::print_breakdown;
use crate::output::{
    color_confidence, format_currency, format_timestamp, print_info, print_json, print_warning,
    render_table, OutputFormat,
};

/// Row for simulated resources table
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "CPU %")]
    cpu: String,
    #[tabled(rename = "Memory %")]
    memory: String,
    #[tabled(rename = "Storage %")]
    storage: String,
    #[tabled(rename = "Cost / month")]
    cost: String,
}

/// Row for recommendations table
#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "Resource")]
    resource_id: String,
    #[tabled(rename = "Recommendation")]
    text: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Savings")]
    savings: String,
}

fn format_pct(value: f64) -> String {
    if value > 0.0 {
        format!("{:.0}", value)
    } else {
        "-".to_string()
    }
}

fn print_resources(resources: &[SimulatedResource], total_cost: f64) {
    if resources.is_empty() {
        print_warning("No billable resources for this usage");
        return;
    }

    let rows: Vec<ResourceRow> = resources
        .iter()
        .map(|r| ResourceRow {
            id: r.id.clone(),
            resource_type: r.resource_type.to_string(),
            cpu: format_pct(r.cpu_usage_pct),
            memory: format_pct(r.memory_usage_pct),
            storage: format_pct(r.storage_usage_pct),
            cost: format_currency(r.cost_per_month),
        })
        .collect();

    println!("{}", render_table(rows));
    println!("\nTotal: {}", format_currency(total_cost).bold());
}

fn print_recommendations(recommendations: &[Recommendation], total_savings: f64) {
    if recommendations.is_empty() {
        print_warning("No recommendations found");
        return;
    }

    let rows: Vec<RecommendationRow> = recommendations
        .iter()
        .map(|r| RecommendationRow {
            resource_id: r.resource_id.clone(),
            text: r.text.clone(),
            confidence: color_confidence(r.confidence_tier),
            savings: format_currency(r.potential_savings),
        })
        .collect();

    println!("{}", render_table(rows));

    for rec in recommendations.iter().filter(|r| !r.actions.is_empty()) {
        println!("\n{}", rec.resource_id.bold());
        for action in &rec.actions {
            println!("  - {}", action);
        }
    }

    println!(
        "\n{} {}",
        "Potential Savings:".bold(),
        format_currency(total_savings).green().bold()
    );
}

/// List the resources synthesized from usage
pub async fn list_resources(
    backend: &Backend,
    params: &UsageParams,
    format: OutputFormat,
) -> Result<()> {
    let result = backend.resources(params).await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => print_resources(&result.resources, result.total_cost),
    }

    Ok(())
}

/// List recommendations for synthesized resources
pub async fn list_recommendations(
    backend: &Backend,
    params: &UsageParams,
    format: OutputFormat,
) -> Result<()> {
    let result = backend.recommendations(params).await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => print_recommendations(&result.recommendations, result.total_savings),
    }

    Ok(())
}

/// Full evaluation: breakdown, resources and recommendations
pub async fn show_report(backend: &Backend, params: &UsageParams, format: OutputFormat) -> Result<()> {
    let report = backend.evaluate(params).await?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            let evaluation = &report.evaluation;
            print_breakdown(&evaluation.breakdown);

            println!("\n{}", "Resources".bold());
            print_resources(&evaluation.resources, evaluation.total_cost);

            println!("\n{}", "Recommendations".bold());
            print_recommendations(&evaluation.recommendations, evaluation.total_savings);
            println!("Savings share:          {:.1}%", report.savings_percent);

            if let Some(ts) = &report.generated_at {
                println!();
                print_info(&format!("Generated at {}", format_timestamp(ts)));
            }
        }
    }

    Ok(())
}
