use std::path::Path;

use image::{ImageFormat, RgbImage};
use ndarray::Array3;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{Result, ToneError};
use crate::frame::RgbFrame;

/// Convert a frame into an `image` buffer.
pub fn to_rgb_image(frame: &RgbFrame) -> Result<RgbImage> {
    let (w, h) = (frame.width(), frame.height());
    let pixels: Vec<u8> = frame.data().iter().copied().collect();
    RgbImage::from_raw(w as u32, h as u32, pixels).ok_or(ToneError::InvalidDimensions {
        width: w,
        height: h,
    })
}

/// Convert an `image` buffer into a frame.
pub fn from_rgb_image(img: &RgbImage) -> Result<RgbFrame> {
    let (w, h) = img.dimensions();
    let data = Array3::from_shape_vec(
        (h as usize, w as usize, COLOR_CHANNEL_COUNT),
        img.as_raw().clone(),
    )
    .map_err(|_| ToneError::InvalidDimensions {
        width: w as usize,
        height: h as usize,
    })?;
    RgbFrame::new(data)
}

/// Load any supported image file as 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbFrame> {
    let img = image::open(path)?;
    from_rgb_image(&img.to_rgb8())
}

/// Save a frame, choosing the format from the file extension (PNG if unknown).
pub fn save_rgb(frame: &RgbFrame, path: &Path) -> Result<()> {
    save_rgb_image(&to_rgb_image(frame)?, path)
}

/// Save an `image` buffer, choosing the format from the file extension.
pub fn save_rgb_image(img: &RgbImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    img.save_with_format(path, format)?;
    Ok(())
}
