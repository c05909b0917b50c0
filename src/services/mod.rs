pub mod fs;
pub mod navigator;
