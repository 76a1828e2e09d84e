pub mod band;
pub mod color;
pub mod consts;
pub mod error;
pub mod frame;
pub mod gain;
pub mod io;
pub mod pipeline;
pub mod report;
pub mod stats;
