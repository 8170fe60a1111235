pub mod device;
pub mod source;
