use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tonesplit_core::io::image_io::load_rgb;
use tonesplit_core::stats::{correct_saturation, IntensityStats, SaturationConfig};

#[derive(Args)]
pub struct StatsArgs {
    /// Image file to analyze
    pub file: PathBuf,

    /// Sigma multiplier for the reported mean + k*stddev level
    #[arg(long, default_value = "2.0")]
    pub sigma: f64,

    /// Fraction of pixels defining the clipping section
    #[arg(long, default_value = "0.1")]
    pub reference_section: f64,
}

pub fn run(args: &StatsArgs) -> Result<()> {
    let frame = load_rgb(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let stats = IntensityStats::from_frame(&frame)
        .with_context(|| format!("Cannot analyze {}", args.file.display()))?;

    let saturation_config = SaturationConfig {
        reference_section: args.reference_section,
        ..Default::default()
    };
    saturation_config.validate()?;
    let saturation = correct_saturation(&stats, &saturation_config)?;

    let level = stats.sigma_level(args.sigma);

    println!("File:           {}", args.file.display());
    println!("Dimensions:     {}x{}", frame.width(), frame.height());
    println!(
        "Nonzero pixels: {} of {}",
        stats.nonzero_count,
        frame.pixel_count()
    );
    println!("Mean:           {:.2}", stats.mean);
    println!("Std deviation:  {:.2}", stats.std_dev);
    println!("Max value:      {}", stats.max_value);
    if let Some(mode) = stats.mode() {
        println!("Most frequent:  {}", mode);
    }
    println!(
        "Mean+{}sd:      {} (ratio {:.6})",
        args.sigma,
        level,
        stats.target_ratio(level)?
    );
    println!("Max ratio:      {}", saturation.naive_ratio);

    if saturation.clipping_detected {
        println!("Clipping:       detected");
        if let Some(standard) = saturation.standard_value {
            println!("  Section:      [{}, 255)", standard);
        }
        println!(
            "  Effective:    {} (ratio {})",
            saturation.effective_max_value, saturation.effective_target_ratio
        );
    } else {
        println!("Clipping:       none");
    }

    Ok(())
}
