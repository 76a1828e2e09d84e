use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::frame::RgbFrame;
use crate::pipeline::CorrectionOutput;
use crate::report::figure::render_comparison;

use super::image_io::{save_rgb, save_rgb_image};
use super::naming;

/// Where and how correction results are written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output directory, created if missing (default: "images").
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Extension, and thereby format, of the image outputs (default: "jpg").
    #[serde(default = "default_image_extension")]
    pub image_extension: String,
    /// Also render histogram comparison figures (default: true).
    #[serde(default = "default_figures")]
    pub figures: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("images")
}
fn default_image_extension() -> String {
    "jpg".to_string()
}
fn default_figures() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            image_extension: default_image_extension(),
            figures: default_figures(),
        }
    }
}

/// Paths written by `export_correction`.
#[derive(Clone, Debug, Default)]
pub struct ExportedFiles {
    pub images: Vec<PathBuf>,
    pub figures: Vec<PathBuf>,
}

/// Write the input, both bands, both corrected bands and the composite, plus
/// one comparison figure per band and one for the whole image.
pub fn export_correction(
    primary: &RgbFrame,
    output: &CorrectionOutput,
    config: &ExportConfig,
) -> Result<ExportedFiles> {
    let dir = config.output_dir.as_path();
    std::fs::create_dir_all(dir)?;
    let ext = config.image_extension.as_str();
    let (low_gain, high_gain) = (output.low.gain, output.high.gain);

    let images = [
        (naming::input_image(ext), primary),
        (naming::low_improved(low_gain, ext), &output.low.frame),
        (naming::high_improved(high_gain, ext), &output.high.frame),
        (naming::improved(low_gain, high_gain, ext), &output.composite),
        (naming::low_band(ext), &output.bands.low),
        (naming::high_band(ext), &output.bands.high),
    ];

    let mut files = ExportedFiles::default();
    for (name, frame) in images {
        let path = dir.join(name);
        save_rgb(frame, &path)?;
        debug!(path = %path.display(), "Saved image");
        files.images.push(path);
    }

    if config.figures {
        let figures = [
            (
                naming::figure(&naming::format_gain(low_gain), "(Low)"),
                &output.bands.low,
                &output.low.frame,
            ),
            (
                naming::figure(&naming::format_gain(high_gain), "(High)"),
                &output.bands.high,
                &output.high.frame,
            ),
            (naming::figure("corrected", ""), primary, &output.composite),
        ];
        for (name, input, corrected) in figures {
            let path = dir.join(name);
            save_figure(input, corrected, &path)?;
            files.figures.push(path);
        }
    }

    Ok(files)
}

/// Render an input/output comparison figure and save it.
pub fn save_figure(input: &RgbFrame, output: &RgbFrame, path: &Path) -> Result<()> {
    let figure = render_comparison(input, output)?;
    save_rgb_image(&figure, path)?;
    debug!(path = %path.display(), "Saved figure");
    Ok(())
}
