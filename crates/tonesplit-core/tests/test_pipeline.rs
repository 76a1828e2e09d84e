mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;

use tonesplit_core::error::ToneError;
use tonesplit_core::io::image_io::{load_rgb, save_rgb};
use tonesplit_core::io::naming;
use tonesplit_core::pipeline::config::CorrectionConfig;
use tonesplit_core::pipeline::{
    correct_files, run_correction, run_correction_reported, NoOpReporter, PipelineStage,
    ProgressReporter,
};

use common::{bright_reference, dark_primary, frame_from_runs, solid_frame};

fn mean_target_config() -> CorrectionConfig {
    let mut config = CorrectionConfig::default();
    config.targets.low_sigma = 0.0;
    config
}

// ---------------------------------------------------------------------------
// In-memory correction
// ---------------------------------------------------------------------------

#[test]
fn test_correction_matches_reference_levels() {
    let output = run_correction(&dark_primary(), &bright_reference(), &mean_target_config()).unwrap();

    // Primary: mean 65, sd 45.
    assert_eq!(output.bands.boundary, 155);
    assert_eq!(output.bands.low_nonzero, 90);
    assert_eq!(output.bands.high_count, 10);

    assert_eq!(output.low_target.value, 100);
    assert_relative_eq!(output.low_target.ratio, 0.1);
    assert_eq!(output.low_target.population, 100);
    assert_eq!(output.low.steps, 100);
    assert_relative_eq!(output.low.gain, 2.0);

    assert!(!output.saturation.clipping_detected);
    assert_eq!(output.high_target.value, 240);
    assert_eq!(output.high.steps, 20);
    assert_relative_eq!(output.high.gain, 1.2);

    let gray = output.composite.gray();
    assert_eq!(gray.count_equal(100), 90);
    assert_eq!(gray.count_equal(240), 10);
    assert_relative_eq!(output.final_high_ratio, 0.1);
}

#[test]
fn test_self_reference_is_identity() {
    let primary = frame_from_runs(10, 10, &[(50, 90), (250, 10)]);
    let output = run_correction(&primary, &primary, &CorrectionConfig::default()).unwrap();

    assert_eq!(output.bands.boundary, 190);
    assert_eq!(output.low.steps, 0);
    assert_eq!(output.high.steps, 0);
    assert_eq!(output.composite, primary);
}

#[test]
fn test_empty_high_band_fails_to_converge() {
    // Every pixel falls below mean + 2sd, so the high band cannot reach 240.
    let primary = frame_from_runs(10, 10, &[(50, 50), (60, 50)]);
    let err = run_correction(&primary, &bright_reference(), &mean_target_config()).unwrap_err();
    assert!(matches!(err, ToneError::NonConvergence { .. }));
}

#[test]
fn test_size_mismatch_is_rejected() {
    let err = run_correction(
        &solid_frame(10, 10, 80),
        &solid_frame(10, 12, 80),
        &CorrectionConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ToneError::DimensionMismatch { .. }));
}

#[test]
fn test_black_primary_is_rejected() {
    let err = run_correction(
        &solid_frame(10, 10, 0),
        &bright_reference(),
        &CorrectionConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ToneError::EmptyImage));
}

#[test]
fn test_invalid_config_is_rejected_before_work() {
    let mut config = CorrectionConfig::default();
    config.decomposition.boundary_sigma = f64::NAN;
    let err = run_correction(&dark_primary(), &bright_reference(), &config).unwrap_err();
    assert!(matches!(err, ToneError::InvalidConfig(_)));
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingReporter {
    stages: Mutex<Vec<PipelineStage>>,
    advances: AtomicUsize,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage, _total_items: Option<usize>) {
        self.stages.lock().unwrap().push(stage);
    }

    fn advance(&self, _items_done: usize) {
        self.advances.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn test_stages_are_reported_in_order() {
    let reporter = Arc::new(RecordingReporter::default());
    run_correction_reported(
        &dark_primary(),
        &bright_reference(),
        &mean_target_config(),
        reporter.clone(),
    )
    .unwrap();

    let stages = reporter.stages.lock().unwrap().clone();
    assert_eq!(
        stages,
        vec![
            PipelineStage::Statistics,
            PipelineStage::Decomposition,
            PipelineStage::LowBandSearch,
            PipelineStage::HighBandSearch,
            PipelineStage::Synthesis,
        ]
    );
    // 101 low steps and 21 high steps.
    assert_eq!(reporter.advances.load(Ordering::Relaxed), 122);
}

// ---------------------------------------------------------------------------
// File-based correction
// ---------------------------------------------------------------------------

#[test]
fn test_correct_files_exports_results() {
    let dir = tempfile::tempdir().unwrap();
    let primary_path = dir.path().join("primary.png");
    let reference_path = dir.path().join("reference.png");
    save_rgb(&dark_primary(), &primary_path).unwrap();
    save_rgb(&bright_reference(), &reference_path).unwrap();

    let mut config = mean_target_config();
    config.export.output_dir = dir.path().join("out");
    config.export.image_extension = "png".to_string();

    let (output, files) =
        correct_files(&primary_path, &reference_path, &config, Arc::new(NoOpReporter)).unwrap();

    assert_eq!(files.images.len(), 6);
    assert_eq!(files.figures.len(), 3);
    for path in files.images.iter().chain(files.figures.iter()) {
        assert!(path.exists(), "missing {}", path.display());
    }

    let out = dir.path().join("out");
    assert!(out.join("input.png").exists());
    assert!(out.join("low_improved_2.0.png").exists());
    assert!(out.join("high_improved_1.2.png").exists());
    assert!(out.join("figure_2.0_(Low).png").exists());
    assert!(out.join("figure_1.2_(High).png").exists());
    assert!(out.join("figure_corrected_.png").exists());

    let composite = load_rgb(&out.join(naming::improved(2.0, 1.2, "png"))).unwrap();
    assert_eq!(composite, output.composite);
}

#[test]
fn test_correct_files_without_figures() {
    let dir = tempfile::tempdir().unwrap();
    let primary_path = dir.path().join("primary.bmp");
    let reference_path = dir.path().join("reference.bmp");
    save_rgb(&dark_primary(), &primary_path).unwrap();
    save_rgb(&bright_reference(), &reference_path).unwrap();

    let mut config = mean_target_config();
    config.export.output_dir = dir.path().join("out");
    config.export.image_extension = "bmp".to_string();
    config.export.figures = false;

    let (_, files) =
        correct_files(&primary_path, &reference_path, &config, Arc::new(NoOpReporter)).unwrap();
    assert_eq!(files.images.len(), 6);
    assert!(files.figures.is_empty());
}

#[test]
fn test_correct_files_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.png");
    let result = correct_files(
        &missing,
        &missing,
        &CorrectionConfig::default(),
        Arc::new(NoOpReporter),
    );
    assert!(result.is_err());
}
