use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tonesplit_core::color::process::channel_extrema;
use tonesplit_core::frame::RgbFrame;
use tonesplit_core::gain::{apply_gain, GainRounding};
use tonesplit_core::io::export::save_figure;
use tonesplit_core::io::image_io::{load_rgb, save_rgb};

#[derive(Clone, Copy, ValueEnum)]
pub enum RoundingArg {
    Truncate,
    Nearest,
}

impl From<RoundingArg> for GainRounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::Truncate => GainRounding::Truncate,
            RoundingArg::Nearest => GainRounding::Nearest,
        }
    }
}

#[derive(Args)]
pub struct ToneArgs {
    /// Input image file
    pub file: PathBuf,

    /// Gain applied to every channel (e.g. 2.5)
    #[arg(long)]
    pub gain: f64,

    /// How scaled values are brought back to integers
    #[arg(long, value_enum, default_value = "truncate")]
    pub rounding: RoundingArg,

    /// Also write an input/output comparison figure (PNG)
    #[arg(long)]
    pub figure: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "out.jpg")]
    pub output: PathBuf,
}

pub fn run(args: &ToneArgs) -> Result<()> {
    if !args.gain.is_finite() || args.gain < 0.0 {
        anyhow::bail!("Gain must be a non-negative number, got {}", args.gain);
    }

    let input = load_rgb(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    println!("Loaded {}x{} image", input.width(), input.height());
    print_extrema("Input", &input);

    let output = apply_gain(&input, args.gain, args.rounding.into());
    println!("Applied gain {}", args.gain);
    print_extrema("Output", &output);

    save_rgb(&output, &args.output)?;
    println!("Saved to {}", args.output.display());

    if let Some(ref path) = args.figure {
        save_figure(&input, &output, path)?;
        println!("Figure saved to {}", path.display());
    }

    Ok(())
}

fn print_extrema(label: &str, frame: &RgbFrame) {
    println!("{label}:");
    for (name, range) in ["R", "G", "B"].iter().zip(channel_extrema(frame)) {
        println!("  {name} Max: {:>3}  Min: {:>3}", range.max, range.min);
    }
}
