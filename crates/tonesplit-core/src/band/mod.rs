pub mod decompose;
pub mod synthesize;

pub use decompose::{decompose, BandPair};
pub use synthesize::synthesize;
