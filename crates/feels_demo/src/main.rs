//! Feels demo CLI
//!
//! List the widget catalogue, or run a scripted session against it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feels_core::kind::WidgetKind;
use feels_core::mood::MoodLevel;
use feels_demo::{script, DemoConfig, Harness};

#[derive(Parser)]
#[command(name = "feels-demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Buttons with feelings, on a virtual clock", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Shared mood: subtle, normal or extreme
    #[arg(short, long, global = true)]
    mood: Option<String>,

    /// Seed for reproducible randomness
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every widget
    List,

    /// Run a script against the catalogue
    Run {
        /// Script file; reads stdin when omitted
        script: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(mood) = &cli.mood {
        config.mood = MoodLevel::parse_lossy(mood);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Run { script } => cmd_run(&config, script),
    }
}

fn cmd_list() -> Result<()> {
    for kind in WidgetKind::ALL {
        println!(
            "{:<24} {:<10} {}",
            kind.name(),
            kind.default_label(),
            kind.description()
        );
    }
    Ok(())
}

fn cmd_run(config: &DemoConfig, path: Option<PathBuf>) -> Result<()> {
    let source = match &path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read script from stdin")?;
            source
        }
    };

    let steps = script::parse(&source)?;
    info!(steps = steps.len(), mood = %config.mood, "running script");

    let mut harness = Harness::new(config);
    for line in harness.run(&steps)? {
        println!("{line}");
    }

    let callbacks = harness.callbacks();
    info!(
        callbacks = callbacks.len(),
        elapsed_ms = harness.context().now(),
        "script finished"
    );
    Ok(())
}
