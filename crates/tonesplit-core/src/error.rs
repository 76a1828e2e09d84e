use thiserror::Error;

use crate::gain::Band;

#[derive(Error, Debug)]
pub enum ToneError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Image dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: usize,
        left_height: usize,
        right_width: usize,
        right_height: usize,
    },

    #[error("Image has no nonzero pixels")]
    EmptyImage,

    #[error("Division by zero while computing {context}")]
    DivideByZero { context: &'static str },

    #[error(
        "Gain search for the {band} band did not converge: value {target_value} needs ratio \
         {target_ratio}, best {best_ratio} up to gain {max_gain}"
    )]
    NonConvergence {
        band: Band,
        target_value: u32,
        target_ratio: f64,
        max_gain: f64,
        best_ratio: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ToneError>;
