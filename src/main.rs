//! proto-regen CLI
//!
//! Usage: proto-regen [OPTIONS]
//!
//! With no options it copies `/input` to `/generator`, injects
//! `option go_package` lines and writes OpenAPI documents under `/output`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use proto_regen::config::{self, Config};
use proto_regen::OutputMode;

/// proto-regen - regenerate API documents and stubs from protobuf sources
#[derive(Parser, Debug)]
#[command(name = "proto-regen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./proto-regen.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory copied into the work tree before scanning
    #[arg(long)]
    input: Option<PathBuf>,

    /// Scan the work tree in place without copying the input first
    #[arg(long, conflicts_with = "input")]
    no_copy: bool,

    /// Work tree to scan and modify
    #[arg(long)]
    work: Option<PathBuf>,

    /// Document output root; mirrors the work tree layout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output mode to generate (repeatable: document, stub)
    #[arg(long = "mode", value_parser = parse_mode)]
    modes: Vec<OutputMode>,

    /// Print a JSON summary on success
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer CLI flags over the loaded configuration
    fn apply(&self, mut config: Config) -> Config {
        if let Some(input) = &self.input {
            config.paths.input = input.clone();
            config.paths.copy_input = true;
        }
        if self.no_copy {
            config.paths.copy_input = false;
        }
        if let Some(work) = &self.work {
            config.paths.work = work.clone();
        }
        if let Some(output) = &self.output {
            config.paths.output = output.clone();
        }
        if !self.modes.is_empty() {
            config.compiler.modes = self.modes.clone();
        }
        config
    }
}

fn parse_mode(s: &str) -> std::result::Result<OutputMode, String> {
    OutputMode::parse(s).ok_or_else(|| format!("unknown mode '{}' (expected document or stub)", s))
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let (loaded, warnings) = config::load_or_default(cli.config.as_deref(), &cwd)
        .context("failed to load configuration")?;
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    let config = cli.apply(
        config::with_env_overrides(loaded).context("invalid environment override")?,
    );

    let report = match proto_regen::app::run(&config) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(error = %err, "regeneration failed");
            return Err(err).context("regenerate-proto failed");
        }
    };

    if cli.json {
        let output = serde_json::json!({
            "event": "regenerate",
            "status": "success",
            "report": report,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        tracing::info!(
            declarations = report.declarations,
            injected = report.directives_injected,
            kept = report.documents_kept,
            dropped = report.documents_dropped,
            stubs = report.stub_invocations,
            "regeneration complete"
        );
    }

    Ok(())
}
