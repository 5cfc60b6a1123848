use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use skydisk_core::io::{load_rgb, save_rgb};
use skydisk_core::pipeline::{process_frame, PipelineConfig};
use skydisk_core::projection::DiskRemapper;

use super::options::ProcessingArgs;

#[derive(Args)]
pub struct FrameArgs {
    /// Input equirectangular image
    pub file: PathBuf,

    /// Output file path
    #[arg(short, long, default_value = "disk.png")]
    pub output: PathBuf,

    #[command(flatten)]
    pub processing: ProcessingArgs,
}

pub fn run(args: &FrameArgs) -> Result<()> {
    let mut config = PipelineConfig::default();
    args.processing.apply(&mut config);

    let mut frame = load_rgb(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    println!("Loaded {}x{} image", frame.width(), frame.height());

    let start = Instant::now();
    let remapper = DiskRemapper::new(&config.projection);
    let disk = process_frame(&mut frame, &config, &remapper)?;
    println!(
        "Projected to {}x{} disk in {:.2}s",
        disk.width(),
        disk.height(),
        start.elapsed().as_secs_f64()
    );

    save_rgb(&disk, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
