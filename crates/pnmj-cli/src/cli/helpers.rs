use super::CliError;
use anyhow::Context;
use pnmj_core::PnmjOrdering;
use pnmj_core::table::{
    BuildSummary, OrderWindow, PnmjBuildInput, PnmjBuilder, PnmjBuilderApi, PnmjTable,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub(super) fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pnmj_core={default_level},pnmj_rs={default_level}"
        ))
    });

    // A subscriber may already be installed when the CLI is driven in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Parses `MIN..=MAX`, `MIN..MAX` (exclusive) or a single order `M`.
pub(super) fn parse_order_window(value: &str) -> Result<OrderWindow, String> {
    let value = value.trim();
    let parse = |text: &str| {
        text.trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid order '{}' in window '{}'", text.trim(), value))
    };

    if let Some((min, max)) = value.split_once("..=") {
        return Ok(OrderWindow::new(parse(min)?, parse(max)?));
    }
    if let Some((min, max)) = value.split_once("..") {
        let max = parse(max)?;
        if max == 0 {
            return Err(format!("order window '{}' is empty", value));
        }
        return Ok(OrderWindow::new(parse(min)?, max - 1));
    }
    let order = parse(value)?;
    Ok(OrderWindow::new(order, order))
}

pub(super) fn build_table(
    capacity: usize,
    ordering: PnmjOrdering,
    input: PnmjBuildInput,
) -> Result<(PnmjTable, BuildSummary), CliError> {
    let mut table = PnmjTable::new(capacity, ordering).map_err(CliError::compute)?;
    let summary = PnmjBuilder.build(&mut table, input).map_err(CliError::compute)?;
    Ok((table, summary))
}

pub(super) fn write_json_artifact<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    let rendered = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize '{}'", path.display()))?;
    fs::write(path, rendered)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

pub(super) fn render_build_summary(table: &PnmjTable, summary: &BuildSummary) -> String {
    let exponents = match (summary.min_exponent, summary.max_exponent) {
        (Some(min), Some(max)) => format!("[{min}, {max}]"),
        _ => "n/a".to_string(),
    };
    [
        format!(
            "PNMJ build: maxDegree={} capacity={} ordering={} orders={}..={}",
            summary.max_degree,
            table.capacity(),
            table.ordering(),
            summary.orders.min,
            summary.orders.max
        ),
        format!(
            "Coefficients written: {} of {}",
            summary.elements_written,
            table.len()
        ),
        format!("X-number exponent range: {exponents}"),
        format!("Underflowed coefficients: {}", summary.underflow_count),
    ]
    .join("\n")
}
