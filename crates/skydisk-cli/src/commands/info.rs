use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use skydisk_core::io::load_rgb;
use skydisk_core::projection::ProjectionGeometry;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Output disk diameter in pixels (default: source height)
    #[arg(long, default_value = "0")]
    pub diameter: usize,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let frame = load_rgb(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let geometry = ProjectionGeometry::new(frame.width(), frame.height(), args.diameter)?;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", frame.width(), frame.height());
    let ratio = frame.width() as f64 / frame.height() as f64;
    println!("Aspect:      {:.3}:1", ratio);
    if (ratio - 2.0).abs() > 0.01 {
        println!("             (not 2:1, longitude will be stretched)");
    }
    println!("Disk:        {0}x{0}", geometry.diameter);

    let map_mb = (geometry.diameter * geometry.diameter * (2 * 4 + 1)) as f64 / (1024.0 * 1024.0);
    println!("Map memory:  {:.1} MB", map_mb);

    Ok(())
}
