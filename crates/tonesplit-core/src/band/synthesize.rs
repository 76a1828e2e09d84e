use crate::color::process::zip_channels;
use crate::error::Result;
use crate::frame::RgbFrame;

/// Recombine two bands by per-channel saturating addition.
pub fn synthesize(low: &RgbFrame, high: &RgbFrame) -> Result<RgbFrame> {
    zip_channels(low, high, u8::saturating_add)
}
