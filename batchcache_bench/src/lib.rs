pub mod config;
pub mod meter;
