use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;
use tonesplit_core::pipeline::config::CorrectionConfig;
use tonesplit_core::pipeline::correct_files;

use crate::progress::BarReporter;
use crate::summary::{print_correction_summary, print_run_header};

#[derive(Args)]
pub struct CorrectArgs {
    /// Image to correct
    pub primary: PathBuf,

    /// Reference exposure of the same scene (same dimensions)
    pub reference: PathBuf,

    /// Correction config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// First gain tried by the search
    #[arg(long)]
    pub p_init: Option<f64>,

    /// Gain increment per search step
    #[arg(long)]
    pub p_interval: Option<f64>,

    /// Largest gain tried before giving up
    #[arg(long)]
    pub max_gain: Option<f64>,

    /// Fraction of reference pixels defining the clipping section (e.g. 0.1)
    #[arg(long)]
    pub reference_section: Option<f64>,

    /// Image format extension for outputs (jpg, png, bmp, tiff)
    #[arg(long)]
    pub format: Option<String>,

    /// Skip histogram figures
    #[arg(long)]
    pub no_figures: bool,
}

pub fn run(args: &CorrectArgs) -> Result<()> {
    let config = build_config(args)?;
    config.validate().context("Invalid correction config")?;

    print_run_header(&args.primary, &args.reference, &config);

    let reporter = Arc::new(BarReporter::new()?);
    let (output, files) = correct_files(&args.primary, &args.reference, &config, reporter.clone())
        .with_context(|| {
            format!(
                "Failed to correct {} against {}",
                args.primary.display(),
                args.reference.display()
            )
        })?;
    reporter.finish();

    print_correction_summary(&output, &files);
    Ok(())
}

fn build_config(args: &CorrectArgs) -> Result<CorrectionConfig> {
    let mut config = match args.config {
        Some(ref path) => load_config(path)?,
        None => CorrectionConfig::default(),
    };

    if let Some(p) = args.p_init {
        config.gain.p_init = p;
    }
    if let Some(p) = args.p_interval {
        config.gain.p_interval = p;
    }
    if let Some(g) = args.max_gain {
        config.gain.max_gain = g;
    }
    if let Some(s) = args.reference_section {
        config.saturation.reference_section = s;
    }
    if let Some(ref dir) = args.output {
        config.export.output_dir = dir.clone();
    }
    if let Some(ref ext) = args.format {
        config.export.image_extension = ext.trim_start_matches('.').to_string();
    }
    if args.no_figures {
        config.export.figures = false;
    }

    Ok(config)
}

fn load_config(path: &Path) -> Result<CorrectionConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&contents).context("Invalid correction config")?;
    debug!(path = %path.display(), "Loaded correction config");
    Ok(config)
}
