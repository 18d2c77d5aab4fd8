//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a percentage with two decimals
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format seconds as a short duration
pub fn format_secs(value: f64) -> String {
    if value >= 60.0 {
        format!("{:.1}m", value / 60.0)
    } else {
        format!("{:.2}s", value)
    }
}

/// Color an uptime/SLA percentage by how healthy it looks
pub fn color_percent(value: f64) -> String {
    let formatted = format_percent(value);
    if value >= 99.0 {
        formatted.green().to_string()
    } else if value >= 95.0 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}

/// Color a correlation by its strength
pub fn color_correlation(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    if value >= 0.7 {
        formatted.red().to_string()
    } else if value >= 0.3 {
        formatted.yellow().to_string()
    } else {
        formatted.to_string()
    }
}
