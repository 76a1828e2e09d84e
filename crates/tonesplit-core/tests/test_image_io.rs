mod common;

use tonesplit_core::error::ToneError;
use tonesplit_core::frame::RgbFrame;
use tonesplit_core::io::image_io::{from_rgb_image, load_rgb, save_rgb, to_rgb_image};

use common::noise_frame;

#[test]
fn test_save_load_roundtrip_png() {
    let frame = noise_frame(9, 13, 21);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.png");

    save_rgb(&frame, &path).unwrap();
    let loaded = load_rgb(&path).unwrap();

    assert_eq!(loaded.width(), 13);
    assert_eq!(loaded.height(), 9);
    assert_eq!(loaded, frame);
}

#[test]
fn test_save_jpeg() {
    let frame = noise_frame(16, 16, 2);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.jpg");

    save_rgb(&frame, &path).unwrap();
    let loaded = load_rgb(&path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (16, 16));
}

#[test]
fn test_unknown_extension_falls_back_to_png() {
    let frame = noise_frame(4, 4, 8);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.out");

    save_rgb(&frame, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_image_buffer_layout() {
    let frame = noise_frame(3, 5, 4);
    let img = to_rgb_image(&frame).unwrap();
    assert_eq!(img.dimensions(), (5, 3));
    assert_eq!(img.get_pixel(4, 2).0, frame.pixel(2, 4));
    assert_eq!(from_rgb_image(&img).unwrap(), frame);
}

#[test]
fn test_load_missing_file() {
    let result = load_rgb(std::path::Path::new("/nonexistent/image.png"));
    assert!(matches!(result, Err(ToneError::ImageError(_)) | Err(ToneError::Io(_))));
}

#[test]
fn test_empty_frame_is_rejected() {
    let result = RgbFrame::zeros(0, 4);
    assert!(matches!(result, Err(ToneError::InvalidDimensions { .. })));
}
