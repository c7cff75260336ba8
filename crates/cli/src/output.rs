//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use optimizer_engine::ConfidenceTier;
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message to stderr
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a dollar amount
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Format a per-unit rate, keeping sub-cent precision
pub fn format_rate(rate: f64) -> String {
    format!("${:.4}", rate)
}

/// Color a confidence tier
pub fn color_confidence(tier: ConfidenceTier) -> String {
    match tier {
        ConfidenceTier::High => tier.as_str().green().to_string(),
        ConfidenceTier::Medium => tier.as_str().yellow().to_string(),
        ConfidenceTier::Low => tier.as_str().red().to_string(),
    }
}

/// Format an RFC 3339 timestamp for display
pub fn format_timestamp(ts: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(ts) {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        ts.to_string()
    }
}

/// Render rows as a rounded table
pub fn render_table<T: tabled::Tabled>(rows: Vec<T>) -> String {
    tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(39.2), "$39.20");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.045), "$0.0450");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2024-03-01T12:30:00Z"),
            "2024-03-01 12:30:00"
        );
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
