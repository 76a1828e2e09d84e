use ndarray::{Array2, Axis, Zip};

use crate::consts::{LUMA_Q14_B, LUMA_Q14_G, LUMA_Q14_R, LUMA_SHIFT, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::{GrayFrame, RgbFrame};

/// BT.601 luminance of one pixel with round-half-up fixed-point arithmetic.
///
/// The weights sum to `1 << 14`, so a replicated pixel `(v, v, v)` maps to `v`.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let acc = r as u32 * LUMA_Q14_R + g as u32 * LUMA_Q14_G + b as u32 * LUMA_Q14_B;
    ((acc + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Grayscale reduction of a whole frame.
///
/// Parallelizes over pixels for frames >= 256x256.
pub fn luminance(frame: &RgbFrame) -> GrayFrame {
    let (h, w) = (frame.height(), frame.width());
    let mut gray = Array2::<u8>::zeros((h, w));

    let zip = Zip::from(&mut gray).and(frame.data().lanes(Axis(2)));
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(|g, px| *g = luma(px[0], px[1], px[2]));
    } else {
        zip.for_each(|g, px| *g = luma(px[0], px[1], px[2]));
    }

    GrayFrame::new(gray)
}
