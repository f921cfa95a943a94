//! CLI entry point for `sql2code`.

use anyhow::Context;
use clap::Parser;
use sql2code::cli::args::Cli;
use sql2code::cli::output::{format_output, write_output};
use sql2code::CodeGenerator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "sql2code=debug" } else { "sql2code=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = cli.options()?;
    let generator = CodeGenerator::shared().context("failed to compile templates")?;
    let codes = generator.generate(&options)?;
    tracing::info!("Generated {} artifact(s)", codes.len());

    let text = format_output(codes, cli.code_type)?;
    write_output(&text, cli.out_path())?;
    Ok(())
}
