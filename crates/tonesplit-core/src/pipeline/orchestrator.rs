use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::band::{decompose, synthesize};
use crate::error::Result;
use crate::frame::RgbFrame;
use crate::gain::{search_gain_with_progress, Band, GainTarget};
use crate::io::export::{export_correction, ExportedFiles};
use crate::io::image_io::load_rgb;
use crate::stats::{correct_saturation, IntensityStats};

use super::config::{CorrectionConfig, HighBandTarget};
use super::types::{CorrectionOutput, NoOpReporter, PipelineStage, ProgressReporter};

/// Run the band-decomposed tone correction on two in-memory images.
pub fn run_correction(
    primary: &RgbFrame,
    reference: &RgbFrame,
    config: &CorrectionConfig,
) -> Result<CorrectionOutput> {
    let reporter: Arc<dyn ProgressReporter> = Arc::new(NoOpReporter);
    run_correction_reported(primary, reference, config, reporter)
}

/// Run the correction with a thread-safe progress reporter.
pub fn run_correction_reported(
    primary: &RgbFrame,
    reference: &RgbFrame,
    config: &CorrectionConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<CorrectionOutput> {
    config.validate()?;
    primary.ensure_same_size(reference)?;

    // Statistics
    reporter.begin_stage(PipelineStage::Statistics, None);
    let primary_stats = IntensityStats::from_frame(primary)?;
    let reference_stats = IntensityStats::from_frame(reference)?;
    info!(
        width = primary.width(),
        height = primary.height(),
        nonzero = primary_stats.nonzero_count,
        mean = primary_stats.mean,
        std_dev = primary_stats.std_dev,
        "Primary statistics"
    );
    info!(
        nonzero = reference_stats.nonzero_count,
        mean = reference_stats.mean,
        std_dev = reference_stats.std_dev,
        max = reference_stats.max_value,
        "Reference statistics"
    );
    let saturation = correct_saturation(&reference_stats, &config.saturation)?;
    reporter.finish_stage();

    // Decomposition
    reporter.begin_stage(PipelineStage::Decomposition, None);
    let boundary = primary_stats.sigma_level(config.decomposition.boundary_sigma);
    let bands = decompose(primary, boundary);
    info!(
        boundary,
        low = bands.low_nonzero,
        high = bands.high_count,
        total = primary_stats.nonzero_count,
        "Decomposition boundary"
    );
    reporter.finish_stage();

    let population = primary_stats.nonzero_count;
    let max_steps = config.gain.max_steps() as usize + 1;

    // Low band
    let low_value = reference_stats.sigma_level(config.targets.low_sigma);
    let low_target = GainTarget {
        value: low_value,
        ratio: reference_stats.target_ratio(low_value)?,
        population,
    };
    reporter.begin_stage(PipelineStage::LowBandSearch, Some(max_steps));
    let r = reporter.clone();
    let low = search_gain_with_progress(Band::Low, &bands.low, &low_target, &config.gain, |n| {
        r.advance(n as usize)
    })?;
    reporter.finish_stage();

    // High band
    let high_value = match config.targets.high_value {
        HighBandTarget::EffectiveMax => saturation.effective_max_value,
        HighBandTarget::ObservedMax => reference_stats.max_value,
    };
    let high_target = GainTarget {
        value: high_value as u32,
        ratio: saturation.effective_target_ratio,
        population,
    };
    reporter.begin_stage(PipelineStage::HighBandSearch, Some(max_steps));
    let r = reporter.clone();
    let high = search_gain_with_progress(
        Band::High,
        &bands.high,
        &high_target,
        &config.gain,
        |n| r.advance(n as usize),
    )?;
    reporter.finish_stage();

    // Synthesis
    reporter.begin_stage(PipelineStage::Synthesis, None);
    let composite = synthesize(&low.frame, &high.frame)?;
    let final_high_ratio =
        composite.gray().count_equal(high_value) as f64 / population as f64;
    info!(
        value = high_value,
        ratio = final_high_ratio,
        low_gain = low.gain,
        high_gain = high.gain,
        "Synthesized corrected image"
    );
    reporter.finish_stage();

    Ok(CorrectionOutput {
        primary_stats,
        reference_stats,
        saturation,
        bands,
        low_target,
        high_target,
        low,
        high,
        composite,
        final_high_ratio,
    })
}

/// Load both images, run the correction and export every result.
pub fn correct_files(
    primary_path: &Path,
    reference_path: &Path,
    config: &CorrectionConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<(CorrectionOutput, ExportedFiles)> {
    reporter.begin_stage(PipelineStage::Reading, Some(2));
    let primary = load_rgb(primary_path)?;
    reporter.advance(1);
    let reference = load_rgb(reference_path)?;
    reporter.advance(2);
    reporter.finish_stage();
    info!(
        primary = %primary_path.display(),
        reference = %reference_path.display(),
        "Loaded input images"
    );

    let output = run_correction_reported(&primary, &reference, config, reporter.clone())?;

    reporter.begin_stage(PipelineStage::Writing, None);
    let files = export_correction(&primary, &output, &config.export)?;
    reporter.finish_stage();
    info!(
        dir = %config.export.output_dir.display(),
        images = files.images.len(),
        figures = files.figures.len(),
        "Output saved"
    );

    Ok((output, files))
}
