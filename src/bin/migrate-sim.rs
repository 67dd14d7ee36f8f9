//! CLI driver: `migrate-sim <input_path> <pre|post> <0|1>`.
//!
//! Reads a guest memory access trace, runs one migration scheme to
//! completion, and prints the resulting `Criterias` as five lines of
//! plain text. Exits non-zero on any unknown token or read failure.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::BufReader;

use anyhow::Context;

use migrasim::engine::MigrationScheme;
use migrasim::error::SimError;
use migrasim::{report, Engine, SimulatorConfig};

fn parse_scheme(token: &str) -> Result<MigrationScheme, SimError> {
    match token {
        "pre" => Ok(MigrationScheme::PreCopy),
        "post" => Ok(MigrationScheme::PostCopy),
        other => Err(SimError::Configuration {
            message: format!("unknown migration scheme `{other}` (expected `pre` or `post`)"),
        }),
    }
}

fn parse_optimization(token: &str) -> Result<bool, SimError> {
    match token {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(SimError::Configuration {
            message: format!("unknown optimization flag `{other}` (expected `0` or `1`)"),
        }),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        anyhow::bail!("usage: {} <input_path> <pre|post> <0|1>", args.first().map(String::as_str).unwrap_or("migrate-sim"));
    }

    let input_path = &args[1];
    let scheme = parse_scheme(&args[2])?;
    let optimization = parse_optimization(&args[3])?;

    let file = File::open(input_path).with_context(|| format!("opening trace file {input_path}"))?;
    let parsed = migrasim::parser::parse_access_trace(BufReader::new(file))
        .with_context(|| format!("parsing trace file {input_path}"))?;

    tracing::info!(
        total_page_count = parsed.total_page_count,
        accesses = parsed.access_history.len(),
        "loaded trace"
    );

    let config = SimulatorConfig::default();
    let engine = Engine::new(parsed.total_page_count, parsed.access_history, config);
    let criterias = engine.run_migration(scheme, optimization);

    report::format_criterias(&criterias, std::io::stdout())?;
    Ok(())
}
