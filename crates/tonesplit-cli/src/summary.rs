use std::path::Path;

use console::Style;
use tonesplit_core::gain::GainSearchResult;
use tonesplit_core::io::export::ExportedFiles;
use tonesplit_core::pipeline::config::CorrectionConfig;
use tonesplit_core::pipeline::CorrectionOutput;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_run_header(primary: &Path, reference: &Path, config: &CorrectionConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Tone Correction"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Primary"),
        s.path.apply_to(primary.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Reference"),
        s.path.apply_to(reference.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.export.output_dir.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Gain Search"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("p_init"),
        s.value.apply_to(config.gain.p_init)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("p_interval"),
        s.value.apply_to(config.gain.p_interval)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max gain"),
        s.value.apply_to(config.gain.max_gain)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Rounding"),
        s.method.apply_to(config.gain.rounding)
    );
    println!();

    println!("  {}", s.header.apply_to("Targets"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Boundary"),
        s.value
            .apply_to(format!("mean + {}sd", config.decomposition.boundary_sigma))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Low"),
        s.value
            .apply_to(format!("reference mean + {}sd", config.targets.low_sigma))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("High"),
        s.method.apply_to(config.targets.high_value)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Section"),
        s.value.apply_to(format!(
            "{}%",
            config.saturation.reference_section * 100.0
        ))
    );
    if !config.export.figures {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Figures"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();
}

pub fn print_correction_summary(output: &CorrectionOutput, files: &ExportedFiles) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Analysis"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Boundary"),
        s.value.apply_to(output.bands.boundary)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Low pixels"),
        s.value.apply_to(format!(
            "{} of {}",
            output.bands.low_nonzero, output.primary_stats.nonzero_count
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("High pixels"),
        s.value.apply_to(format!(
            "{} of {}",
            output.bands.high_count, output.primary_stats.nonzero_count
        ))
    );
    if output.saturation.clipping_detected {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Clipping"),
            s.disabled.apply_to(format!(
                "255 replaced by {} (ratio {} -> {})",
                output.saturation.effective_max_value,
                output.saturation.naive_ratio,
                output.saturation.effective_target_ratio
            ))
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Gains"));
    print_gain(&s, "Low", &output.low, output.low_target.value);
    print_gain(&s, "High", &output.high, output.high_target.value);
    println!(
        "    {:<12}{}",
        s.label.apply_to("Final"),
        s.value.apply_to(format!(
            "{:.2}% at {}",
            output.final_high_ratio * 100.0,
            output.high_target.value
        ))
    );
    println!();

    println!("  {}", s.header.apply_to("Files"));
    for path in files.images.iter().chain(files.figures.iter()) {
        println!("    {}", s.path.apply_to(path.display()));
    }
    println!();
}

fn print_gain(s: &Styles, label: &str, result: &GainSearchResult, target: u32) {
    println!(
        "    {:<12}{}",
        s.label.apply_to(label),
        s.value.apply_to(format!(
            "{} (target {}, {} steps, ratio {:.4})",
            result.gain, target, result.steps, result.achieved_ratio
        ))
    );
}
