use ndarray::Array3;
use tracing::debug;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::frame::RgbFrame;

/// Two spatially disjoint images split from one source at a gray boundary.
#[derive(Clone, Debug)]
pub struct BandPair {
    /// Pixels with gray value <= boundary; everything else is zero.
    pub low: RgbFrame,
    /// Pixels with gray value > boundary; everything else is zero.
    pub high: RgbFrame,
    pub boundary: u32,
    /// Low-band pixels whose gray value is above zero.
    pub low_nonzero: usize,
    pub high_count: usize,
}

/// Split `frame` into low and high bands at `boundary`.
///
/// The boundary may exceed 255, in which case the high band is empty.
pub fn decompose(frame: &RgbFrame, boundary: u32) -> BandPair {
    let gray = frame.gray();
    let (h, w) = (frame.height(), frame.width());
    let src = frame.data();

    let is_low = |row: usize, col: usize| gray.data[[row, col]] as u32 <= boundary;
    let low = Array3::from_shape_fn((h, w, COLOR_CHANNEL_COUNT), |(r, c, ch)| {
        if is_low(r, c) {
            src[[r, c, ch]]
        } else {
            0
        }
    });
    let high = Array3::from_shape_fn((h, w, COLOR_CHANNEL_COUNT), |(r, c, ch)| {
        if is_low(r, c) {
            0
        } else {
            src[[r, c, ch]]
        }
    });

    let low_nonzero = gray
        .data
        .iter()
        .filter(|&&v| v > 0 && v as u32 <= boundary)
        .count();
    let high_count = gray.data.iter().filter(|&&v| v as u32 > boundary).count();
    debug!(boundary, low_nonzero, high_count, "Decomposed image");

    BandPair {
        low: RgbFrame::from_array_unchecked(low),
        high: RgbFrame::from_array_unchecked(high),
        boundary,
        low_nonzero,
        high_count,
    }
}
