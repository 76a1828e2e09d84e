use crate::error::{Result, ToneError};
use crate::frame::{GrayFrame, RgbFrame};

/// 256-bin count of gray values over a whole image, zeros included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntensityHistogram {
    counts: [u64; 256],
}

impl IntensityHistogram {
    pub fn from_gray(gray: &GrayFrame) -> Self {
        let mut counts = [0u64; 256];
        for &v in gray.data.iter() {
            counts[v as usize] += 1;
        }
        Self { counts }
    }

    /// Number of pixels equal to `value`.
    pub fn count(&self, value: u8) -> u64 {
        self.counts[value as usize]
    }

    /// Number of pixels in the half-open range `[lo, hi)`.
    pub fn count_in_range(&self, lo: u8, hi: u8) -> u64 {
        if lo >= hi {
            return 0;
        }
        self.counts[lo as usize..hi as usize].iter().sum()
    }

    pub fn nonzero_total(&self) -> u64 {
        self.counts[1..].iter().sum()
    }

    /// Most frequent nonzero value. Ties resolve to the smallest value.
    pub fn mode_nonzero(&self) -> Option<u8> {
        let mut best: Option<(u8, u64)> = None;
        for v in 1..=255u8 {
            let c = self.counts[v as usize];
            if c > 0 && best.map_or(true, |(_, bc)| c > bc) {
                best = Some((v, c));
            }
        }
        best.map(|(v, _)| v)
    }

    /// Median of the values in `[lo, hi)`.
    ///
    /// For an even count this is the mean of the two middle values, truncated.
    /// Returns `None` when the range holds no pixels.
    pub fn median_in_range(&self, lo: u8, hi: u8) -> Option<u8> {
        let total = self.count_in_range(lo, hi);
        if total == 0 {
            return None;
        }

        // Value at sorted position `k` (0-based) within the range.
        let nth = |k: u64| -> usize {
            let mut seen = 0u64;
            for v in lo as usize..hi as usize {
                seen += self.counts[v];
                if seen > k {
                    return v;
                }
            }
            hi as usize - 1
        };

        let upper = nth(total / 2);
        let median = if total % 2 == 1 {
            upper
        } else {
            (nth(total / 2 - 1) + upper) / 2
        };
        Some(median as u8)
    }
}

/// Aggregate statistics of a grayscale-reduced image.
///
/// Mean and standard deviation cover nonzero pixels only; the maximum covers
/// the whole image.
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityStats {
    pub nonzero_count: usize,
    pub mean: f64,
    /// Population standard deviation (divisor N).
    pub std_dev: f64,
    pub max_value: u8,
    pub histogram: IntensityHistogram,
}

impl IntensityStats {
    /// Compute statistics for a gray image.
    ///
    /// Fails with `EmptyImage` if no pixel is above zero.
    pub fn from_gray(gray: &GrayFrame) -> Result<Self> {
        let histogram = IntensityHistogram::from_gray(gray);
        let n = histogram.nonzero_total();
        if n == 0 {
            return Err(ToneError::EmptyImage);
        }

        let sum: u64 = (1..256).map(|v| v as u64 * histogram.counts[v]).sum();
        let mean = sum as f64 / n as f64;
        let var = (1..256)
            .map(|v| histogram.counts[v] as f64 * (v as f64 - mean).powi(2))
            .sum::<f64>()
            / n as f64;

        let max_value = (0..=255u8)
            .rev()
            .find(|&v| histogram.count(v) > 0)
            .unwrap_or(0);

        Ok(Self {
            nonzero_count: n as usize,
            mean,
            std_dev: var.sqrt(),
            max_value,
            histogram,
        })
    }

    pub fn from_frame(frame: &RgbFrame) -> Result<Self> {
        Self::from_gray(&frame.gray())
    }

    /// Fraction of nonzero pixels whose gray value equals `value`.
    ///
    /// Values above 255 do not occur in 8-bit data and have ratio 0.
    pub fn target_ratio(&self, value: u32) -> Result<f64> {
        if self.nonzero_count == 0 {
            return Err(ToneError::DivideByZero {
                context: "target ratio",
            });
        }
        let count = u8::try_from(value).map_or(0, |v| self.histogram.count(v));
        Ok(count as f64 / self.nonzero_count as f64)
    }

    /// Fraction of nonzero pixels in the half-open gray range `[lo, hi)`.
    pub fn section_ratio(&self, lo: u8, hi: u8) -> Result<f64> {
        if self.nonzero_count == 0 {
            return Err(ToneError::DivideByZero {
                context: "section ratio",
            });
        }
        Ok(self.histogram.count_in_range(lo, hi) as f64 / self.nonzero_count as f64)
    }

    /// Integer level `trunc(mean) + trunc(k * trunc(std_dev))`.
    ///
    /// May exceed 255.
    pub fn sigma_level(&self, k: f64) -> u32 {
        let level = self.mean.trunc() + (k * self.std_dev.trunc()).trunc();
        level.max(0.0) as u32
    }

    /// Most frequent nonzero gray value.
    pub fn mode(&self) -> Option<u8> {
        self.histogram.mode_nonzero()
    }
}
