use crate::consts::{HISTOGRAM_BINS, HISTOGRAM_YLIM_DIVISOR};
use crate::frame::RgbFrame;

/// Equal-width histogram over the data range.
///
/// Bin `i` covers `[edges[i], edges[i + 1])`; the last bin is closed.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub counts: Vec<u64>,
    pub edges: Vec<f64>,
}

impl Histogram {
    /// Histogram of 8-bit values, given as a 256-entry count table.
    ///
    /// The range is `[min, max]` of the present values; a single distinct
    /// value `v` uses `[v - 0.5, v + 0.5]` and no data uses `[0, 1]`.
    pub fn from_value_counts(value_counts: &[u64; 256], bins: usize) -> Self {
        let bins = bins.max(1);
        let present = move || (0..256usize).filter(move |&v| value_counts[v] > 0);
        let (lo, hi) = match (present().next(), present().last()) {
            (Some(min), Some(max)) if min == max => (min as f64 - 0.5, max as f64 + 0.5),
            (Some(min), Some(max)) => (min as f64, max as f64),
            _ => (0.0, 1.0),
        };

        let width = hi - lo;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| lo + width * i as f64 / bins as f64)
            .collect();

        let mut counts = vec![0u64; bins];
        for v in present() {
            let x = v as f64;
            let mut idx = (((x - lo) * bins as f64 / width) as usize).min(bins - 1);
            // Keep the bin consistent with the stored edges.
            if idx > 0 && x < edges[idx] {
                idx -= 1;
            } else if idx < bins - 1 && x >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += value_counts[v];
        }

        Self { counts, edges }
    }

    /// Histogram of the nonzero values in `values`.
    pub fn of_nonzero<I>(values: I, bins: usize) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let mut table = [0u64; 256];
        for v in values {
            if v > 0 {
                table[v as usize] += 1;
            }
        }
        Self::from_value_counts(&table, bins)
    }

    /// Highest single-bin count.
    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }
}

/// Histogram of nonzero gray values.
pub fn gray_histogram(frame: &RgbFrame) -> Histogram {
    Histogram::of_nonzero(frame.gray().data.iter().copied(), HISTOGRAM_BINS)
}

/// Histograms of each channel's nonzero values, in R, G, B order.
pub fn channel_histograms(frame: &RgbFrame) -> [Histogram; 3] {
    let channel = move |ch: usize| {
        Histogram::of_nonzero(
            frame.data().rows().into_iter().map(move |px| px[ch]),
            HISTOGRAM_BINS,
        )
    };
    [channel(0), channel(1), channel(2)]
}

/// Shared y-axis limit for an input/output pair of figure panels.
///
/// Uses the peak of the histogram of all nonzero channel values, over
/// whichever of the two frames is larger, divided by 2.3.
pub fn shared_y_limit(input: &RgbFrame, output: &RgbFrame) -> f64 {
    let all = |frame: &RgbFrame| {
        Histogram::of_nonzero(frame.data().iter().copied(), HISTOGRAM_BINS).peak()
    };
    all(input).max(all(output)) as f64 / HISTOGRAM_YLIM_DIVISOR
}
