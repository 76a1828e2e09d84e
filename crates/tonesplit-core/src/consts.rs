/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in a color frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Largest representable 8-bit intensity; also the clipping value.
pub const SATURATION_VALUE: u8 = u8::MAX;

/// BT.601 luminance weights in Q14 fixed point (0.299, 0.587, 0.114).
/// Identical to OpenCV's `RGB2GRAY` coefficients for 8-bit data.
pub const LUMA_Q14_R: u32 = 4899;
pub const LUMA_Q14_G: u32 = 9617;
pub const LUMA_Q14_B: u32 = 1868;

/// Fixed-point shift for the Q14 luminance weights.
pub const LUMA_SHIFT: u32 = 14;

/// Initial gain of the linear gain search.
pub const DEFAULT_P_INIT: f64 = 1.0;

/// Gain increment per search step.
pub const DEFAULT_P_INTERVAL: f64 = 0.01;

/// Upper bound on the gain search. Above this the target is treated as unreachable.
pub const DEFAULT_MAX_GAIN: f64 = 20.0;

/// Decimal digits every searched gain is quantized to.
pub const GAIN_DIGITS: u32 = 2;

/// Smallest accepted gain increment; finer steps would collapse under quantization.
pub const MIN_P_INTERVAL: f64 = 0.01;

/// Upper bound on the number of gain search steps a config may describe.
pub const MAX_SEARCH_STEPS: u64 = 100_000;

/// Fraction of nonzero reference pixels that must lie in `[standard, 255)`
/// before the clipping section is accepted (10%).
pub const DEFAULT_REFERENCE_SECTION: f64 = 0.1;

/// Sigma multiplier for the decomposition boundary `mean + k * stddev`.
pub const DEFAULT_BOUNDARY_SIGMA: f64 = 2.0;

/// Sigma multiplier for the low-band target value on the reference.
pub const DEFAULT_TARGET_SIGMA: f64 = 2.0;

/// Rounding applied to the naive max-value ratio.
pub const DEFAULT_MAX_RATIO_DIGITS: u32 = 8;

/// Rounding applied to the ratio of the substituted effective max value.
pub const DEFAULT_CORRECTED_RATIO_DIGITS: u32 = 4;

/// Number of histogram bins used in report figures.
pub const HISTOGRAM_BINS: usize = 50;

/// Report histograms share a y-limit of `peak / HISTOGRAM_YLIM_DIVISOR`.
pub const HISTOGRAM_YLIM_DIVISOR: f64 = 2.3;

/// Horizontal range of report histograms, in pixel values.
pub const HISTOGRAM_X_RANGE: (f64, f64) = (-5.0, 260.0);

/// Size of a single figure panel in pixels (width, height).
pub const FIGURE_PANEL_SIZE: (u32, u32) = (400, 300);

/// Gap between figure panels and around the figure border, in pixels.
pub const FIGURE_MARGIN: u32 = 16;
