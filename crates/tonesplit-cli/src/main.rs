mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tonesplit", about = "Band-decomposed adaptive tone correction")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correct an image against a reference exposure
    Correct(commands::correct::CorrectArgs),
    /// Multiply every channel of an image by a fixed gain
    Tone(commands::tone::ToneArgs),
    /// Show intensity statistics and clipping analysis of an image
    Stats(commands::stats::StatsArgs),
    /// Print or save the default correction config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Correct(args) => commands::correct::run(args),
        Commands::Tone(args) => commands::tone::run(args),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn correct_takes_two_positionals() {
        let cli = Cli::try_parse_from(["tonesplit", "correct", "a.bmp", "b.bmp"]).unwrap();
        match cli.command {
            Commands::Correct(args) => {
                assert_eq!(args.primary.to_str(), Some("a.bmp"));
                assert_eq!(args.reference.to_str(), Some("b.bmp"));
            }
            _ => panic!("expected correct subcommand"),
        }
    }

    #[test]
    fn correct_rejects_missing_reference() {
        let err = Cli::try_parse_from(["tonesplit", "correct", "a.bmp"])
            .err()
            .expect("one positional must be rejected");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn correct_rejects_extra_positionals() {
        let result = Cli::try_parse_from(["tonesplit", "correct", "a.bmp", "b.bmp", "c.bmp"]);
        assert!(result.is_err());
    }

    #[test]
    fn tone_requires_gain() {
        assert!(Cli::try_parse_from(["tonesplit", "tone", "a.jpg"]).is_err());
        assert!(Cli::try_parse_from(["tonesplit", "tone", "a.jpg", "--gain", "2.5"]).is_ok());
    }
}
