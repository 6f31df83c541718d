pub mod encoder;
pub mod bmp;
