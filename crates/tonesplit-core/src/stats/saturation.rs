use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::consts::{
    DEFAULT_CORRECTED_RATIO_DIGITS, DEFAULT_MAX_RATIO_DIGITS, DEFAULT_REFERENCE_SECTION,
    SATURATION_VALUE,
};
use crate::error::{Result, ToneError};

use super::intensity::IntensityStats;
use super::round_digits;

/// Parameters for clipping detection on the reference image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaturationConfig {
    /// Fraction of nonzero pixels that `[standard, 255)` must hold (default: 0.1).
    #[serde(default = "default_reference_section")]
    pub reference_section: f64,
    /// Decimal digits kept for the ratio of the observed maximum (default: 8).
    #[serde(default = "default_max_ratio_digits")]
    pub max_ratio_digits: u32,
    /// Decimal digits kept for the ratio of the substituted value (default: 4).
    #[serde(default = "default_corrected_ratio_digits")]
    pub corrected_ratio_digits: u32,
}

fn default_reference_section() -> f64 {
    DEFAULT_REFERENCE_SECTION
}
fn default_max_ratio_digits() -> u32 {
    DEFAULT_MAX_RATIO_DIGITS
}
fn default_corrected_ratio_digits() -> u32 {
    DEFAULT_CORRECTED_RATIO_DIGITS
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self {
            reference_section: DEFAULT_REFERENCE_SECTION,
            max_ratio_digits: DEFAULT_MAX_RATIO_DIGITS,
            corrected_ratio_digits: DEFAULT_CORRECTED_RATIO_DIGITS,
        }
    }
}

impl SaturationConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.reference_section.is_finite() || self.reference_section < 0.0 {
            return Err(ToneError::InvalidConfig(format!(
                "reference_section must be a non-negative fraction, got {}",
                self.reference_section
            )));
        }
        Ok(())
    }
}

/// Result of clipping detection: the value/ratio pair the high band should match.
#[derive(Clone, Debug, PartialEq)]
pub struct SaturationCorrection {
    pub clipping_detected: bool,
    pub effective_max_value: u8,
    pub effective_target_ratio: f64,
    /// Lower edge of the section `[standard, 255)`, when clipping was handled.
    pub standard_value: Option<u8>,
    /// Ratio of the observed maximum before any substitution.
    pub naive_ratio: f64,
}

/// Detect hard clipping at 255 and substitute a representative pre-clip value.
///
/// Clipping is assumed only when 255 is both the maximum and the most frequent
/// nonzero value. The substitute is the median of `[standard, 255)`, where
/// `standard` is the highest value whose section reaches `reference_section`.
pub fn correct_saturation(
    stats: &IntensityStats,
    config: &SaturationConfig,
) -> Result<SaturationCorrection> {
    let naive_ratio = round_digits(
        stats.target_ratio(stats.max_value as u32)?,
        config.max_ratio_digits,
    );
    let unchanged = SaturationCorrection {
        clipping_detected: false,
        effective_max_value: stats.max_value,
        effective_target_ratio: naive_ratio,
        standard_value: None,
        naive_ratio,
    };

    if stats.max_value != SATURATION_VALUE {
        return Ok(unchanged);
    }
    let mode = stats.mode();
    debug!(?mode, "Most frequent reference value");
    if mode != Some(SATURATION_VALUE) {
        return Ok(unchanged);
    }

    info!(
        ratio = naive_ratio,
        "Value 255 is both maximum and mode of the reference, treating it as clipped"
    );

    let standard = find_standard_value(stats, config.reference_section)?;
    let Some(median) = stats.histogram.median_in_range(standard, SATURATION_VALUE) else {
        warn!(
            standard,
            "No unsaturated reference pixels in the section, keeping the clipped maximum"
        );
        return Ok(SaturationCorrection {
            clipping_detected: true,
            standard_value: Some(standard),
            ..unchanged
        });
    };

    let ratio = round_digits(
        stats.target_ratio(median as u32)?,
        config.corrected_ratio_digits,
    );
    info!(
        standard,
        median,
        old_ratio = naive_ratio,
        new_ratio = ratio,
        "Substituted effective maximum"
    );

    Ok(SaturationCorrection {
        clipping_detected: true,
        effective_max_value: median,
        effective_target_ratio: ratio,
        standard_value: Some(standard),
        naive_ratio,
    })
}

/// Walk down from 254 and return the first value whose section
/// `[value, 255)` covers at least `section` of the nonzero pixels.
///
/// Background pixels never join the section, so the walk stops at 1 when the
/// threshold is never reached.
pub fn find_standard_value(stats: &IntensityStats, section: f64) -> Result<u8> {
    for candidate in (1..SATURATION_VALUE).rev() {
        if stats.section_ratio(candidate, SATURATION_VALUE)? >= section {
            return Ok(candidate);
        }
    }
    Ok(1)
}
