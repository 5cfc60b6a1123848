use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use skydisk_core::pipeline::{run_pipeline_reported, FrameRange, PipelineConfig};
use tracing::debug;

use super::options::ProcessingArgs;
use crate::progress::BarReporter;
use crate::summary::{print_batch_result, print_pipeline_summary};

const USAGE: &str = "usage: skydisk run <in-pattern> <out-pattern> [min] <max>\n\n\
    where\n  in-pattern   is e.g. input/frames/in{:04d}.png\n  \
    out-pattern  is e.g. output/frames/out{:04d}.png\n  \
    min, max     are the 1-indexed numbers of the first and last frame (min defaults to 1)";

#[derive(Args)]
pub struct RunArgs {
    /// Input filename pattern, e.g. "in{:04d}.png"
    #[arg(required_unless_present = "config")]
    pub input: Option<String>,

    /// Output filename pattern, e.g. "out{:04d}.png"
    #[arg(required_unless_present = "config")]
    pub output: Option<String>,

    /// Frame numbers: "<max>" or "<min> <max>" (1-indexed, inclusive)
    #[arg(num_args = 1..=2, required_unless_present = "config")]
    pub frames: Vec<u32>,

    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub processing: ProcessingArgs,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config: PipelineConfig = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        debug!(path = %config_path.display(), "Loaded pipeline config");
        toml::from_str(&contents).context("Invalid pipeline config")?
    } else {
        PipelineConfig::default()
    };

    if let Some(ref input) = args.input {
        config.input = input.clone();
    }
    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    match args.frames.as_slice() {
        [] => {}
        [max] => config.frames = parse_range(1, *max)?,
        [min, max] => config.frames = parse_range(*min, *max)?,
        _ => bail!("{USAGE}"),
    }
    args.processing.apply(&mut config);

    print_pipeline_summary(&config);

    let reporter = Arc::new(BarReporter::new());
    let summary = run_pipeline_reported(&config, reporter.clone());
    reporter.clear();
    let summary = summary.context("Batch aborted")?;

    print_batch_result(&summary, &config);
    Ok(())
}

fn parse_range(first: u32, last: u32) -> Result<FrameRange> {
    FrameRange::new(first, last).with_context(|| format!("Frames: {first} to {last}\n\n{USAGE}"))
}
