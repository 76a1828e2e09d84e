//! Output file names for the correction results.
//!
//! Gains are written with the shortest decimal form that still has a
//! fractional part, e.g. `1.0`, `1.5`, `1.23`.

/// Format a gain for use in a file name.
pub fn format_gain(gain: f64) -> String {
    let s = format!("{gain}");
    if gain.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}

pub fn input_image(ext: &str) -> String {
    format!("input.{ext}")
}

pub fn low_band(ext: &str) -> String {
    format!("low.{ext}")
}

pub fn high_band(ext: &str) -> String {
    format!("high.{ext}")
}

pub fn low_improved(gain: f64, ext: &str) -> String {
    format!("low_improved_{}.{ext}", format_gain(gain))
}

pub fn high_improved(gain: f64, ext: &str) -> String {
    format!("high_improved_{}.{ext}", format_gain(gain))
}

pub fn improved(low_gain: f64, high_gain: f64, ext: &str) -> String {
    format!(
        "improved_low-{}_high-{}.{ext}",
        format_gain(low_gain),
        format_gain(high_gain)
    )
}

/// Figure name: `figure_<tag>_<label>.png`, e.g. `figure_1.23_(Low).png`.
pub fn figure(tag: &str, label: &str) -> String {
    format!("figure_{tag}_{label}.png")
}
