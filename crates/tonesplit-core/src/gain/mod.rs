pub mod apply;
pub mod search;

use serde::{Deserialize, Serialize};

pub use apply::{apply_gain, GainRounding};
pub use search::{search_gain, search_gain_with_progress, GainSearchConfig, GainSearchResult, GainTarget};

/// Which luminance band a gain belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    Low,
    High,
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}
