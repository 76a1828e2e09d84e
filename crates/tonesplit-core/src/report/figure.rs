use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use crate::consts::{FIGURE_MARGIN, FIGURE_PANEL_SIZE, HISTOGRAM_X_RANGE};
use crate::error::Result;
use crate::frame::RgbFrame;
use crate::io::image_io::to_rgb_image;

use super::histogram::{channel_histograms, gray_histogram, shared_y_limit, Histogram};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXES_BACKGROUND: Rgb<u8> = Rgb([0xE6, 0xE6, 0xE6]);
const GRAY_BAR: [u8; 3] = [0, 0, 0];
const CHANNEL_BARS: [[u8; 3]; 3] = [[255, 0, 0], [0, 160, 0], [0, 0, 255]];
const CHANNEL_ALPHA: f64 = 0.5;

/// A rectangular region of the figure canvas.
#[derive(Clone, Copy, Debug)]
struct Panel {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl Panel {
    fn at(col: u32, row: u32) -> Self {
        let (w, h) = FIGURE_PANEL_SIZE;
        Self {
            x: FIGURE_MARGIN + col * (w + FIGURE_MARGIN),
            y: FIGURE_MARGIN + row * (h + FIGURE_MARGIN),
            w,
            h,
        }
    }
}

/// Render a 2x3 comparison figure.
///
/// Columns are input and output. Rows are the image itself, the grayscale
/// histogram and the overlaid R/G/B histograms. All histogram panels share
/// one y-limit so the two columns are directly comparable.
pub fn render_comparison(input: &RgbFrame, output: &RgbFrame) -> Result<RgbImage> {
    let (pw, ph) = FIGURE_PANEL_SIZE;
    let mut canvas = RgbImage::from_pixel(
        2 * pw + 3 * FIGURE_MARGIN,
        3 * ph + 4 * FIGURE_MARGIN,
        BACKGROUND,
    );

    let y_limit = shared_y_limit(input, output);
    for (col, frame) in [input, output].into_iter().enumerate() {
        let col = col as u32;
        draw_thumbnail(&mut canvas, frame, Panel::at(col, 0))?;

        let gray_panel = Panel::at(col, 1);
        fill(&mut canvas, gray_panel, AXES_BACKGROUND);
        draw_histogram(&mut canvas, gray_panel, &gray_histogram(frame), y_limit, GRAY_BAR, 1.0);

        let rgb_panel = Panel::at(col, 2);
        fill(&mut canvas, rgb_panel, AXES_BACKGROUND);
        for (hist, color) in channel_histograms(frame).iter().zip(CHANNEL_BARS) {
            draw_histogram(&mut canvas, rgb_panel, hist, y_limit, color, CHANNEL_ALPHA);
        }
    }

    Ok(canvas)
}

/// Scale the frame to fit the panel, keeping its aspect ratio, and center it.
fn draw_thumbnail(canvas: &mut RgbImage, frame: &RgbFrame, panel: Panel) -> Result<()> {
    let img = to_rgb_image(frame)?;
    let (w, h) = img.dimensions();
    let scale = (panel.w as f64 / w as f64).min(panel.h as f64 / h as f64);
    let tw = ((w as f64 * scale).round() as u32).clamp(1, panel.w);
    let th = ((h as f64 * scale).round() as u32).clamp(1, panel.h);

    let thumb = imageops::resize(&img, tw, th, FilterType::Triangle);
    let x = panel.x + (panel.w - tw) / 2;
    let y = panel.y + (panel.h - th) / 2;
    imageops::overlay(canvas, &thumb, x as i64, y as i64);
    Ok(())
}

fn fill(canvas: &mut RgbImage, panel: Panel, color: Rgb<u8>) {
    for y in panel.y..panel.y + panel.h {
        for x in panel.x..panel.x + panel.w {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Draw histogram bars into `panel`, clipping bars taller than `y_limit`.
fn draw_histogram(
    canvas: &mut RgbImage,
    panel: Panel,
    hist: &Histogram,
    y_limit: f64,
    color: [u8; 3],
    alpha: f64,
) {
    let y_limit = if y_limit > 0.0 { y_limit } else { 1.0 };
    let (x_min, x_max) = HISTOGRAM_X_RANGE;
    let to_px = |v: f64| {
        (((v - x_min) / (x_max - x_min)) * panel.w as f64).clamp(0.0, panel.w as f64) as u32
    };

    for (i, &count) in hist.counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let x0 = to_px(hist.edges[i]);
        let x1 = to_px(hist.edges[i + 1]).max(x0 + 1).min(panel.w);
        let bar = ((count as f64 / y_limit).min(1.0) * panel.h as f64).round() as u32;

        for y in panel.h - bar..panel.h {
            for x in x0..x1 {
                let px = canvas.get_pixel_mut(panel.x + x, panel.y + y);
                *px = blend(*px, color, alpha);
            }
        }
    }
}

fn blend(base: Rgb<u8>, color: [u8; 3], alpha: f64) -> Rgb<u8> {
    let mix = |b: u8, c: u8| (b as f64 * (1.0 - alpha) + c as f64 * alpha).round() as u8;
    Rgb([
        mix(base[0], color[0]),
        mix(base[1], color[1]),
        mix(base[2], color[2]),
    ])
}
