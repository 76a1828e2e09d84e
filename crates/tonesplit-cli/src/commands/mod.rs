pub mod config;
pub mod correct;
pub mod stats;
pub mod tone;
