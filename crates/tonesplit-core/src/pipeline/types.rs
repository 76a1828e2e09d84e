use crate::band::BandPair;
use crate::frame::RgbFrame;
use crate::gain::{GainSearchResult, GainTarget};
use crate::stats::{IntensityStats, SaturationCorrection};

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Reading,
    Statistics,
    Decomposition,
    LowBandSearch,
    HighBandSearch,
    Synthesis,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reading => write!(f, "Reading images"),
            Self::Statistics => write!(f, "Analyzing intensities"),
            Self::Decomposition => write!(f, "Decomposing bands"),
            Self::LowBandSearch => write!(f, "Searching low gain"),
            Self::HighBandSearch => write!(f, "Searching high gain"),
            Self::Synthesis => write!(f, "Synthesizing"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Everything the correction computed, carried between stages.
#[derive(Clone, Debug)]
pub struct CorrectionOutput {
    pub primary_stats: IntensityStats,
    pub reference_stats: IntensityStats,
    pub saturation: SaturationCorrection,
    pub bands: BandPair,
    pub low_target: GainTarget,
    pub high_target: GainTarget,
    pub low: GainSearchResult,
    pub high: GainSearchResult,
    pub composite: RgbFrame,
    /// Fraction of primary nonzero pixels at the high target value after synthesis.
    pub final_high_ratio: f64,
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., search steps), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// `items_done` work items within the current stage have completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Progress reporter that ignores every call.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
