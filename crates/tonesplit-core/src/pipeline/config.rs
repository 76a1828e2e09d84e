use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BOUNDARY_SIGMA, DEFAULT_TARGET_SIGMA};
use crate::error::{Result, ToneError};
use crate::gain::GainSearchConfig;
use crate::io::export::ExportConfig;
use crate::stats::SaturationConfig;

/// Everything the correction pipeline can be tuned with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectionConfig {
    #[serde(default)]
    pub gain: GainSearchConfig,
    #[serde(default)]
    pub saturation: SaturationConfig,
    #[serde(default)]
    pub decomposition: DecompositionConfig,
    #[serde(default)]
    pub targets: TargetConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl CorrectionConfig {
    pub fn validate(&self) -> Result<()> {
        self.gain.validate()?;
        self.saturation.validate()?;
        for (name, k) in [
            ("boundary_sigma", self.decomposition.boundary_sigma),
            ("low_sigma", self.targets.low_sigma),
        ] {
            if !k.is_finite() {
                return Err(ToneError::InvalidConfig(format!(
                    "{name} must be finite, got {k}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecompositionConfig {
    /// Boundary = trunc(mean) + trunc(k * trunc(stddev)) of the primary image.
    #[serde(default = "default_boundary_sigma")]
    pub boundary_sigma: f64,
}

fn default_boundary_sigma() -> f64 {
    DEFAULT_BOUNDARY_SIGMA
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            boundary_sigma: DEFAULT_BOUNDARY_SIGMA,
        }
    }
}

/// Gray value the high band is searched against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighBandTarget {
    /// The substituted value when clipping was detected, else the maximum.
    #[default]
    EffectiveMax,
    /// Always the observed maximum, paired with the effective ratio.
    ObservedMax,
}

impl std::fmt::Display for HighBandTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EffectiveMax => write!(f, "Effective max"),
            Self::ObservedMax => write!(f, "Observed max"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Low-band target = trunc(mean) + trunc(k * trunc(stddev)) of the reference.
    #[serde(default = "default_low_sigma")]
    pub low_sigma: f64,
    #[serde(default)]
    pub high_value: HighBandTarget,
}

fn default_low_sigma() -> f64 {
    DEFAULT_TARGET_SIGMA
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            low_sigma: DEFAULT_TARGET_SIGMA,
            high_value: HighBandTarget::default(),
        }
    }
}
