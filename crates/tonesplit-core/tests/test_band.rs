mod common;

use tonesplit_core::band::{decompose, synthesize};
use tonesplit_core::error::ToneError;
use tonesplit_core::gain::{apply_gain, GainRounding};
use tonesplit_core::stats::IntensityStats;

use common::{noise_frame, scenario_4x4, solid_frame};

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_split_at_mean() {
    let frame = scenario_4x4();
    let stats = IntensityStats::from_frame(&frame).unwrap();
    let bands = decompose(&frame, stats.sigma_level(0.0));

    assert_eq!(bands.boundary, 121);
    assert_eq!(bands.low_nonzero, 8);
    assert_eq!(bands.high_count, 8);
    for col in 0..4 {
        assert_eq!(bands.low.pixel(0, col), frame.pixel(0, col));
        assert_eq!(bands.low.pixel(3, col), [0, 0, 0]);
        assert_eq!(bands.high.pixel(0, col), [0, 0, 0]);
        assert_eq!(bands.high.pixel(3, col), frame.pixel(3, col));
    }
}

#[test]
fn test_scenario_unit_gain_recombines() {
    let frame = scenario_4x4();
    let bands = decompose(&frame, 121);
    let low = apply_gain(&bands.low, 1.0, GainRounding::Truncate);
    assert_eq!(low, bands.low);
    assert_eq!(synthesize(&low, &bands.high).unwrap(), frame);
}

#[test]
fn test_scenario_default_boundary_keeps_everything_low() {
    let frame = scenario_4x4();
    let stats = IntensityStats::from_frame(&frame).unwrap();
    let bands = decompose(&frame, stats.sigma_level(2.0));

    assert_eq!(bands.boundary, 337);
    assert_eq!(bands.high_count, 0);
    assert_eq!(bands.low, frame);
    assert!(bands.high.data().iter().all(|&v| v == 0));
}

#[test]
fn test_boundary_is_inclusive_for_low() {
    let frame = solid_frame(3, 3, 90);
    let bands = decompose(&frame, 90);
    assert_eq!(bands.low_nonzero, 9);
    assert_eq!(bands.high_count, 0);

    let bands = decompose(&frame, 89);
    assert_eq!(bands.low_nonzero, 0);
    assert_eq!(bands.high_count, 9);
}

#[test]
fn test_bands_are_disjoint_and_reconstruct() {
    let frame = noise_frame(40, 30, 11);
    let bands = decompose(&frame, 128);

    for ((low, high), src) in bands
        .low
        .data()
        .iter()
        .zip(bands.high.data().iter())
        .zip(frame.data().iter())
    {
        assert!(*low == 0 || *high == 0);
        assert_eq!(low.wrapping_add(*high), *src);
    }
    assert_eq!(synthesize(&bands.low, &bands.high).unwrap(), frame);
}

#[test]
fn test_uncorrected_recombination_for_any_boundary() {
    let frame = noise_frame(12, 9, 42);
    for boundary in [0, 1, 64, 127, 200, 254, 255, 400] {
        let bands = decompose(&frame, boundary);
        let low = apply_gain(&bands.low, 1.0, GainRounding::Truncate);
        let high = apply_gain(&bands.high, 1.0, GainRounding::Truncate);
        assert_eq!(synthesize(&low, &high).unwrap(), frame, "boundary {boundary}");
    }
}

#[test]
fn test_split_is_decided_per_pixel_not_per_channel() {
    // Gray of (250, 10, 10) is 82, so the whole pixel goes low despite the red channel.
    let data = ndarray::Array3::from_shape_vec((1, 1, 3), vec![250, 10, 10]).unwrap();
    let frame = tonesplit_core::frame::RgbFrame::new(data).unwrap();
    let bands = decompose(&frame, 100);
    assert_eq!(bands.low.pixel(0, 0), [250, 10, 10]);
    assert_eq!(bands.high.pixel(0, 0), [0, 0, 0]);
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

#[test]
fn test_synthesis_saturates() {
    let low = solid_frame(2, 2, 200);
    let high = solid_frame(2, 2, 100);
    let sum = synthesize(&low, &high).unwrap();
    assert!(sum.data().iter().all(|&v| v == 255));
}

#[test]
fn test_synthesis_rejects_size_mismatch() {
    let err = synthesize(&solid_frame(2, 2, 1), &solid_frame(2, 3, 1)).unwrap_err();
    assert!(matches!(err, ToneError::DimensionMismatch { .. }));
}
