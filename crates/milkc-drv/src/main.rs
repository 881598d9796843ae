//! milkc - MilkDrop preset to GLSL fragment shader compiler.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use milkc_drv::Config;

/// Compile a MilkDrop preset into a GLSL 330 fragment shader.
#[derive(Parser)]
#[command(name = "milkc", version, about)]
struct Cli {
    /// Input preset file (.milk)
    input: PathBuf,

    /// Output fragment shader file (.frag)
    output: PathBuf,

    /// Log pipeline phases and recovered errors
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(&cli) {
        eprintln!("error: {:#}", error);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config {
        input: cli.input.clone(),
        output: cli.output.clone(),
    };

    milkc_drv::convert(&config)
        .with_context(|| format!("failed to convert {}", cli.input.display()))?;

    println!(
        "Successfully converted {} to {}",
        cli.input.display(),
        cli.output.display()
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
