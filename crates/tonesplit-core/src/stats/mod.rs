pub mod intensity;
pub mod saturation;

pub use intensity::{IntensityHistogram, IntensityStats};
pub use saturation::{correct_saturation, SaturationConfig, SaturationCorrection};

/// Round to a fixed number of decimal digits.
pub fn round_digits(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}
