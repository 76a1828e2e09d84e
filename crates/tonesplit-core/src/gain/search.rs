use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::luma::luma;
use crate::consts::{
    DEFAULT_MAX_GAIN, DEFAULT_P_INIT, DEFAULT_P_INTERVAL, GAIN_DIGITS, MAX_SEARCH_STEPS,
    MIN_P_INTERVAL, PARALLEL_PIXEL_THRESHOLD,
};
use crate::error::{Result, ToneError};
use crate::frame::RgbFrame;
use crate::stats::round_digits;

use super::apply::{apply_gain, gain_lut, GainRounding};
use super::Band;

/// Parameters for the linear gain search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GainSearchConfig {
    /// First gain tried (default: 1.0).
    #[serde(default = "default_p_init")]
    pub p_init: f64,
    /// Increment between tried gains, at least 0.01 (default: 0.01).
    #[serde(default = "default_p_interval")]
    pub p_interval: f64,
    /// Largest gain tried before giving up (default: 20.0).
    #[serde(default = "default_max_gain")]
    pub max_gain: f64,
    #[serde(default)]
    pub rounding: GainRounding,
}

fn default_p_init() -> f64 {
    DEFAULT_P_INIT
}
fn default_p_interval() -> f64 {
    DEFAULT_P_INTERVAL
}
fn default_max_gain() -> f64 {
    DEFAULT_MAX_GAIN
}

impl Default for GainSearchConfig {
    fn default() -> Self {
        Self {
            p_init: DEFAULT_P_INIT,
            p_interval: DEFAULT_P_INTERVAL,
            max_gain: DEFAULT_MAX_GAIN,
            rounding: GainRounding::default(),
        }
    }
}

impl GainSearchConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.p_init.is_finite() || self.p_init <= 0.0 {
            return Err(ToneError::InvalidConfig(format!(
                "p_init must be positive, got {}",
                self.p_init
            )));
        }
        if !self.p_interval.is_finite() || self.p_interval < MIN_P_INTERVAL {
            return Err(ToneError::InvalidConfig(format!(
                "p_interval must be at least {MIN_P_INTERVAL}, got {}",
                self.p_interval
            )));
        }
        if !self.max_gain.is_finite() || self.max_gain < self.p_init {
            return Err(ToneError::InvalidConfig(format!(
                "max_gain ({}) must be at least p_init ({})",
                self.max_gain, self.p_init
            )));
        }
        if self.max_steps() > MAX_SEARCH_STEPS {
            return Err(ToneError::InvalidConfig(format!(
                "gain range {}..{} in steps of {} exceeds {MAX_SEARCH_STEPS} steps",
                self.p_init, self.max_gain, self.p_interval
            )));
        }
        Ok(())
    }

    /// Index of the last step whose gain does not exceed `max_gain`.
    pub fn max_steps(&self) -> u64 {
        ((self.max_gain - self.p_init) / self.p_interval + 1e-9).floor() as u64
    }

    /// Gain tried at `step`, quantized to two decimals.
    ///
    /// Computed from the index so steps do not drift. The quantized value is
    /// the one searched, applied and reported.
    pub fn gain_at(&self, step: u64) -> f64 {
        round_digits(self.p_init + step as f64 * self.p_interval, GAIN_DIGITS)
    }
}

/// What a band must reproduce: `ratio` of `population` pixels at gray `value`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainTarget {
    /// Target gray value; values above 255 can never be hit.
    pub value: u32,
    pub ratio: f64,
    /// Denominator of the achieved ratio.
    pub population: usize,
}

/// Outcome of a converged gain search.
#[derive(Clone, Debug)]
pub struct GainSearchResult {
    pub band: Band,
    /// Stopping gain, quantized to two decimals.
    pub gain: f64,
    /// Number of increments taken from `p_init`.
    pub steps: u64,
    pub achieved_ratio: f64,
    /// The band with the stopping gain applied.
    pub frame: RgbFrame,
}

/// Find the first gain, stepping linearly from `p_init`, at which the band's
/// fraction of pixels at `target.value` reaches `target.ratio`.
pub fn search_gain(
    band: Band,
    frame: &RgbFrame,
    target: &GainTarget,
    config: &GainSearchConfig,
) -> Result<GainSearchResult> {
    search_gain_with_progress(band, frame, target, config, |_| {})
}

/// Same as `search_gain`, calling `on_step` with the number of steps tried.
pub fn search_gain_with_progress<F>(
    band: Band,
    frame: &RgbFrame,
    target: &GainTarget,
    config: &GainSearchConfig,
    mut on_step: F,
) -> Result<GainSearchResult>
where
    F: FnMut(u64),
{
    config.validate()?;
    if target.population == 0 {
        return Err(ToneError::DivideByZero {
            context: "gain search ratio",
        });
    }

    let non_convergence = |best_ratio: f64| ToneError::NonConvergence {
        band,
        target_value: target.value,
        target_ratio: target.ratio,
        max_gain: config.max_gain,
        best_ratio,
    };

    // Pixels that are black in every channel stay black under any gain.
    let lit: Vec<[u8; 3]> = frame
        .data()
        .rows()
        .into_iter()
        .filter(|px| px.iter().any(|&v| v > 0))
        .map(|px| [px[0], px[1], px[2]])
        .collect();
    let dark = if target.value == 0 {
        (frame.pixel_count() - lit.len()) as u64
    } else {
        0
    };

    let value = match u8::try_from(target.value) {
        Ok(v) => v,
        Err(_) if target.ratio <= 0.0 => {
            return finish(band, frame, config, 0, 0.0);
        }
        Err(_) => return Err(non_convergence(0.0)),
    };
    if target.ratio > 1.0 {
        return Err(non_convergence(0.0));
    }

    let population = target.population as f64;
    let max_steps = config.max_steps();
    debug!(
        %band,
        value,
        ratio = target.ratio,
        lit = lit.len(),
        max_steps,
        "Starting gain search"
    );
    let mut best_ratio = 0.0f64;
    for step in 0..=max_steps {
        let gain = config.gain_at(step);
        let lut = gain_lut(gain, config.rounding);
        let hits = count_hits(&lit, &lut, value) + dark;
        let ratio = hits as f64 / population;
        best_ratio = best_ratio.max(ratio);
        on_step(step + 1);

        if ratio >= target.ratio {
            return finish(band, frame, config, step, ratio);
        }
    }

    Err(non_convergence(best_ratio))
}

fn finish(
    band: Band,
    frame: &RgbFrame,
    config: &GainSearchConfig,
    step: u64,
    achieved_ratio: f64,
) -> Result<GainSearchResult> {
    let gain = config.gain_at(step);
    info!(%band, gain, steps = step, achieved_ratio, "Gain search converged");
    Ok(GainSearchResult {
        band,
        gain,
        steps: step,
        achieved_ratio,
        frame: apply_gain(frame, gain, config.rounding),
    })
}

/// Count pixels whose scaled luminance equals `value`.
fn count_hits(pixels: &[[u8; 3]], lut: &[u8; 256], value: u8) -> u64 {
    let hit = |px: &[u8; 3]| {
        luma(
            lut[px[0] as usize],
            lut[px[1] as usize],
            lut[px[2] as usize],
        ) == value
    };
    let hits = if pixels.len() >= PARALLEL_PIXEL_THRESHOLD {
        pixels.par_iter().filter(|px| hit(px)).count()
    } else {
        pixels.iter().filter(|px| hit(px)).count()
    };
    hits as u64
}
