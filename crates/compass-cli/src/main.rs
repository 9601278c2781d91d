//! Compass CLI Application
//!
//! Command-line interface and MCP server for generating weekly life plans.

mod args;
mod cli;
mod mcp;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use compass_core::{Config, ValidationMode};
use log::info;
use mcp::{run_stdio_server, CompassMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let cli = Cli::new(TerminalRenderer::new(!args.no_color));

    match run(&cli, args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli.report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, args: Args) -> Result<()> {
    let Args {
        config,
        model,
        api_key,
        command,
        ..
    } = args;

    let mut settings = Config::load(config.as_deref())
        .context("Failed to load configuration")?
        .with_process_env();
    if api_key.is_some() {
        settings.api_key = api_key;
    }
    if model.is_some() {
        settings.model = model;
    }

    info!("Compass started");

    match command {
        Generate(args) => {
            let validation = validation_for(args.strict, &settings);
            let generator = settings
                .into_builder()
                .and_then(|builder| builder.with_validation(validation).build())
                .context("Failed to initialize plan generator")?;
            cli.generate(generator, args).await
        }
        Prompt(args) => cli.prompt(&settings, args),
        Render(args) => {
            let validation = validation_for(args.strict, &settings);
            cli.render(&args, validation)
        }
        Serve => {
            info!("Starting Compass MCP server");
            run_stdio_server(CompassMcpServer::new(settings))
                .await
                .context("MCP server failed")
        }
    }
}

fn validation_for(strict_flag: bool, settings: &Config) -> ValidationMode {
    if strict_flag {
        ValidationMode::Strict
    } else {
        settings.validation()
    }
}
