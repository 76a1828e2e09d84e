pub mod luma;
pub mod process;
