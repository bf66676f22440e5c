//! extdoc CLI entry point

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use extdoc_engine::cli::{Cli, OutputFormat};
use extdoc_engine::report::{format_json, format_text};
use extdoc_engine::{extract_file, EngineContext};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.engine_config().context("loading configuration")?;

    // Logs go to stderr; RUST_LOG overrides the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cli.log_level(&config)))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let engine = EngineContext::new(&config);
    tracing::debug!("namespaces: {:?}", engine.aliases.roots());

    let mut exit = ExitCode::SUCCESS;
    for path in &cli.files {
        match extract_file(path, &engine) {
            Ok(extraction) => {
                let output = match cli.format {
                    OutputFormat::Json => format_json(&extraction)?,
                    OutputFormat::Text => format_text(&extraction),
                };
                if cli.files.len() > 1 && cli.format == OutputFormat::Text {
                    println!("== {}", path.display());
                }
                println!("{}", output.trim_end());
            }
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                exit = e.exit_code();
            }
        }
    }
    Ok(exit)
}
