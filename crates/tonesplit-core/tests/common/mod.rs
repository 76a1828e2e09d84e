#![allow(dead_code)]

use ndarray::Array2;
use tonesplit_core::frame::RgbFrame;

/// Build a replicated-gray RGB frame from row slices.
pub fn gray_frame(rows: &[&[u8]]) -> RgbFrame {
    let h = rows.len();
    let w = rows[0].len();
    let gray = Array2::from_shape_fn((h, w), |(r, c)| rows[r][c]);
    RgbFrame::from_gray(&gray).expect("valid frame")
}

/// Uniform replicated-gray frame.
pub fn solid_frame(h: usize, w: usize, value: u8) -> RgbFrame {
    RgbFrame::from_gray(&Array2::from_elem((h, w), value)).expect("valid frame")
}

/// Frame where the first pixels get the listed values (in row-major order)
/// according to `(value, count)` runs. Remaining pixels are zero.
pub fn frame_from_runs(h: usize, w: usize, runs: &[(u8, usize)]) -> RgbFrame {
    let mut values = Vec::with_capacity(h * w);
    for &(v, n) in runs {
        values.extend(std::iter::repeat(v).take(n));
    }
    assert!(values.len() <= h * w, "runs exceed frame size");
    values.resize(h * w, 0);
    let gray = Array2::from_shape_vec((h, w), values).expect("shape matches");
    RgbFrame::from_gray(&gray).expect("valid frame")
}

/// The 4x4 scenario: a dark {10, 20} top half and a bright {200, 255} bottom half.
pub fn scenario_4x4() -> RgbFrame {
    gray_frame(&[
        &[10, 10, 20, 20],
        &[10, 10, 20, 20],
        &[200, 200, 255, 255],
        &[200, 200, 255, 255],
    ])
}

/// Deterministic pseudo-random color frame (64-bit LCG).
pub fn noise_frame(h: usize, w: usize, seed: u64) -> RgbFrame {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let data = ndarray::Array3::from_shape_fn((h, w, 3), |_| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 56) as u8
    });
    RgbFrame::new(data).expect("valid frame")
}

/// Primary image: 90 px at 50 and 10 px at 200 (10x10).
pub fn dark_primary() -> RgbFrame {
    frame_from_runs(10, 10, &[(50, 90), (200, 10)])
}

/// Reference with mean 100 and maximum 240 (10x10).
pub fn bright_reference() -> RgbFrame {
    frame_from_runs(10, 10, &[(60, 40), (105, 40), (100, 10), (240, 10)])
}
