//! Display utilities and output formatting for the gecko CLI.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Table,
    Json,
}

/// Print a value as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format an optional number, using `-` for missing values.
pub(crate) fn num(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_number)
}

/// Format an optional percentage with two decimals.
pub(crate) fn pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:+.2}%"))
}

/// Format a number compactly: large values get a K/M/B/T suffix, small
/// values keep enough precision to be readable.
pub(crate) fn format_number(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e4 {
        format!("{:.2}K", value / 1e3)
    } else if abs >= 1.0 || abs == 0.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.6}")
    }
}

/// Truncate a string to `width` characters.
pub(crate) fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}
