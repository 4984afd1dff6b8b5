//! SliceKit command-line preview builder

use anyhow::{Context, Result};
use clap::Parser;
use slicekit::{build_preview, init_logging, Config, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "slicekit")]
#[command(about = "Build a web preview record from 3D-printer G-code", long_about = None)]
struct Cli {
    /// Input G-code file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output JSON file (overrides output.path)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file (.toml or .json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => match Config::default_config_path() {
            Ok(path) => {
                debug!("Looking for config at {}", path.display());
                Config::load_or_default(&path)
                    .with_context(|| format!("loading config {}", path.display()))
            }
            Err(e) => {
                debug!("{}; using default config", e);
                Ok(Config::default())
            }
        },
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    info!("SliceKit {} (built {})", VERSION, BUILD_DATE);

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    if cli.pretty {
        config.output.pretty = true;
    }

    let data = build_preview(&cli.input, &config)
        .with_context(|| format!("processing {}", cli.input.display()))?;

    data.write_to_file(&config.output.path, config.output.pretty)
        .with_context(|| format!("writing {}", config.output.path.display()))?;

    Ok(())
}
