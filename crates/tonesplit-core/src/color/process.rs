use ndarray::{Array3, Zip};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::Result;
use crate::frame::RgbFrame;

/// Apply a per-value function to every channel of every pixel.
pub fn map_channels<F>(frame: &RgbFrame, f: F) -> RgbFrame
where
    F: Fn(u8) -> u8 + Sync + Send,
{
    let mut out = Array3::<u8>::zeros(frame.data().raw_dim());
    let zip = Zip::from(&mut out).and(frame.data());
    if frame.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(|o, &v| *o = f(v));
    } else {
        zip.for_each(|o, &v| *o = f(v));
    }
    RgbFrame::from_array_unchecked(out)
}

/// Combine two equally sized frames channel by channel.
pub fn zip_channels<F>(a: &RgbFrame, b: &RgbFrame, f: F) -> Result<RgbFrame>
where
    F: Fn(u8, u8) -> u8 + Sync + Send,
{
    a.ensure_same_size(b)?;
    let mut out = Array3::<u8>::zeros(a.data().raw_dim());
    let zip = Zip::from(&mut out).and(a.data()).and(b.data());
    if a.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(|o, &x, &y| *o = f(x, y));
    } else {
        zip.for_each(|o, &x, &y| *o = f(x, y));
    }
    Ok(RgbFrame::from_array_unchecked(out))
}

/// Minimum and maximum value of one channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelRange {
    pub min: u8,
    pub max: u8,
}

/// Per-channel (R, G, B) value ranges over the whole frame, zeros included.
pub fn channel_extrema(frame: &RgbFrame) -> [ChannelRange; 3] {
    let mut ranges = [ChannelRange { min: u8::MAX, max: 0 }; 3];
    for lane in frame.data().rows() {
        for (range, &v) in ranges.iter_mut().zip(lane.iter()) {
            range.min = range.min.min(v);
            range.max = range.max.max(v);
        }
    }
    ranges
}
