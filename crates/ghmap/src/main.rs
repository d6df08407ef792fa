mod cli;
mod color;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use model_map::Registry;
use output::output_error;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color);
    init_tracing(cli.verbose);

    let format = cli.format;
    if let Err(e) = run(cli) {
        output_error(&e, format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.merge_with_cli(cli.strict, cli.compact);

    let registry = Registry::new(config.decode_options());

    match &cli.command {
        Commands::Decode { target, file } => {
            let payload = read_json(file.as_deref())?;
            let decoded = registry
                .decode_named(target, &payload)
                .with_context(|| format!("Failed to decode payload as `{}`", target))?;
            output::output_decoded(&decoded, cli.format, config.pretty)
        }
        Commands::Encode { target, file } => {
            let record = read_json(file.as_deref())?;
            let body = registry
                .encode_named(target, &record)
                .with_context(|| format!("Failed to encode `{}`", target))?;
            output::print_json(&body, config.pretty)
        }
        Commands::Targets => output::output_targets(cli.format, config.pretty),
    }
}

/// Read a JSON document from a file, or from stdin when no path is given
fn read_json(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    serde_json::from_str(&text).context("Input is not valid JSON")
}
