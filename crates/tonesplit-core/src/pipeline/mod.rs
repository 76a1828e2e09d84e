pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{correct_files, run_correction, run_correction_reported};
pub use types::{CorrectionOutput, NoOpReporter, PipelineStage, ProgressReporter};
