use serde::{Deserialize, Serialize};

use crate::color::process::map_channels;
use crate::frame::RgbFrame;

/// How a scaled channel value is brought back to an integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GainRounding {
    /// Drop the fractional part.
    #[default]
    Truncate,
    /// Round to nearest, ties to even.
    Nearest,
}

impl std::fmt::Display for GainRounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truncate => write!(f, "Truncate"),
            Self::Nearest => write!(f, "Nearest"),
        }
    }
}

/// Multiply one channel value by `gain`, clamped to [0, 255].
#[inline]
pub fn scale_channel(value: u8, gain: f64, rounding: GainRounding) -> u8 {
    let scaled = value as f64 * gain;
    let scaled = match rounding {
        GainRounding::Truncate => scaled.trunc(),
        GainRounding::Nearest => scaled.round_ties_even(),
    };
    scaled.clamp(0.0, 255.0) as u8
}

/// Lookup table mapping every 8-bit value through `scale_channel`.
pub fn gain_lut(gain: f64, rounding: GainRounding) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        *out = scale_channel(v as u8, gain, rounding);
    }
    lut
}

/// Scale all three channels of every pixel by the same gain.
///
/// A gain of 1.0 returns an identical frame.
pub fn apply_gain(frame: &RgbFrame, gain: f64, rounding: GainRounding) -> RgbFrame {
    let lut = gain_lut(gain, rounding);
    map_channels(frame, |v| lut[v as usize])
}
