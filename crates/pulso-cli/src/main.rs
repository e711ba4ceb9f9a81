//! Pulso Vital CLI - financial report calculator.
//!
//! Computes the same report as the HTTP service from a JSON document on disk
//! or on stdin. Useful for spot-checking an intake document or for batch
//! pipelines that do not want to run the server.

use anyhow::Context;
use clap::Parser;
use pulso_core::compute_financials;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

/// CLI arguments structure.
#[derive(Parser)]
#[command(
    name = "pulso",
    version,
    about = "Pulso Vital financial report calculator",
    long_about = None
)]
struct Cli {
    /// Input JSON file; reads stdin when omitted or "-". The document is
    /// either `{"datos_crudos": {...}, "flags": {...}}` or the bare
    /// `datos_crudos` object.
    input: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(short, long)]
    pretty: bool,

    /// Print only the raw numeric section.
    #[arg(long, conflicts_with = "formatted_only")]
    raw_only: bool,

    /// Print only the formatted section.
    #[arg(long, conflicts_with = "raw_only")]
    formatted_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let text = match &cli.input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let document: Value = serde_json::from_str(&text).context("input is not valid JSON")?;

    // Accept the service request envelope or a bare intake document.
    let datos = document.get("datos_crudos").unwrap_or(&document);
    let flags = document.get("flags").cloned().unwrap_or(Value::Null);

    let report = compute_financials(datos, &flags);

    let output = if cli.raw_only {
        serde_json::to_value(&report.raw)?
    } else if cli.formatted_only {
        serde_json::to_value(&report.formatted)?
    } else {
        serde_json::to_value(&report)?
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(())
}
