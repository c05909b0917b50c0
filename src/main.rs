use anyhow::{Context, Result};
use clap::Parser;
use fsnav::console::render::{JsonRenderer, Renderer, TextRenderer};
use fsnav::console::shell::Shell;
use fsnav::core::config::{Cli, Config, OutputFormat};
use fsnav::core::errors::Error;
use fsnav::core::telemetry::logging::init_logging;
use fsnav::services::navigator::Navigator;
use std::io;

fn main() -> Result<()> {
    let config = Config::from(Cli::parse());
    init_logging(&config.log_directive);

    let (navigator, denied) = match &config.start_dir {
        Some(dir) => Navigator::open(dir)
            .with_context(|| format!("cannot open start directory {}", dir.display()))?,
        None => Navigator::new().context("cannot open working directory")?,
    };
    tracing::info!(format = ?config.format, "starting");

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    match config.format {
        OutputFormat::Text => run(&config, navigator, &denied, stdin, TextRenderer::new(stdout)),
        OutputFormat::Json => run(&config, navigator, &denied, stdin, JsonRenderer::new(stdout)),
    }
}

fn run<R: io::BufRead, D: Renderer>(
    config: &Config,
    navigator: Navigator,
    denied: &[Error],
    input: R,
    renderer: D,
) -> Result<()> {
    let mut shell = Shell::new(navigator, input, renderer)?;
    shell.greet(config.banner, denied)?;
    shell.run()?;
    Ok(())
}
