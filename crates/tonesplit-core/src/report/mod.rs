pub mod figure;
pub mod histogram;
