use ndarray::{Array2, Array3};

use crate::color::luma::luminance;
use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{Result, ToneError};

/// An 8-bit RGB image.
/// Pixel data is row-major with shape = (height, width, 3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbFrame {
    data: Array3<u8>,
}

impl RgbFrame {
    /// Wrap an `(height, width, 3)` array. Empty or non-RGB shapes are rejected.
    pub fn new(data: Array3<u8>) -> Result<Self> {
        let (h, w, c) = data.dim();
        if h == 0 || w == 0 || c != COLOR_CHANNEL_COUNT {
            return Err(ToneError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        Ok(Self { data })
    }

    /// Build a frame whose three channels all carry the given gray values.
    pub fn from_gray(gray: &Array2<u8>) -> Result<Self> {
        let (h, w) = gray.dim();
        Self::new(Array3::from_shape_fn((h, w, COLOR_CHANNEL_COUNT), |(r, c, _)| {
            gray[[r, c]]
        }))
    }

    /// All-black frame of the given size.
    pub fn zeros(height: usize, width: usize) -> Result<Self> {
        Self::new(Array3::zeros((height, width, COLOR_CHANNEL_COUNT)))
    }

    pub(crate) fn from_array_unchecked(data: Array3<u8>) -> Self {
        debug_assert_eq!(data.dim().2, COLOR_CHANNEL_COUNT);
        Self { data }
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }

    /// Grayscale reduction of this frame.
    pub fn gray(&self) -> GrayFrame {
        luminance(self)
    }

    /// Fail with `DimensionMismatch` unless both frames have the same size.
    pub fn ensure_same_size(&self, other: &RgbFrame) -> Result<()> {
        if self.width() != other.width() || self.height() != other.height() {
            return Err(ToneError::DimensionMismatch {
                left_width: self.width(),
                left_height: self.height(),
                right_width: other.width(),
                right_height: other.height(),
            });
        }
        Ok(())
    }
}

/// Single-channel luminance derived from an `RgbFrame`.
/// Shape = (height, width).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayFrame {
    pub data: Array2<u8>,
}

impl GrayFrame {
    pub fn new(data: Array2<u8>) -> Self {
        Self { data }
    }

    /// Number of pixels exactly equal to `value`.
    pub fn count_equal(&self, value: u8) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }
}
