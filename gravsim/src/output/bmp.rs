//! 24-bit Windows bitmap output for the long-exposure composite.

use std::io::Write;

use image::codecs::bmp::BmpEncoder;
use image::{ColorType, ImageResult};

use crate::visualization::raster::Raster;

/// Encode `raster` as an uncompressed 24-bit BMP
pub fn write_bmp<W: Write>(raster: &Raster, out: &mut W) -> ImageResult<()> {
    let mut encoder = BmpEncoder::new(out);
    encoder.encode(raster.as_bytes(), raster.width(), raster.height(), ColorType::Rgb8)
}
