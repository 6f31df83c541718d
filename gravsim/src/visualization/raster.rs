//! 24-bit RGB raster with disk drawing
//!
//! Backed by an [`RgbImage`], so pixels are row-major, top row first, three
//! bytes (R, G, B) each. Pixel `(i, j)` covers `[i, i+1) x [j, j+1)` in
//! continuous pixel coordinates, so its centre is at `(i + 0.5, j + 0.5)`.

use image::{Pixel, RgbImage};

use crate::visualization::palette::Rgb;

pub const BYTES_PER_PIXEL: usize = 3;

/// How a new colour combines with the one already in a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pen {
    Replace,
    Max, // per channel
}

impl Pen {
    fn apply(self, old: Rgb<u8>, new: Rgb<u8>) -> Rgb<u8> {
        match self {
            Self::Replace => new,
            Self::Max => old.map2(&new, u8::max),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    image: RgbImage,
}

impl Raster {
    pub fn new(width: u32, height: u32, fill: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, fill),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw pixel bytes, row-major RGB
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Colour at `(x, y)`, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Paint one pixel; out-of-bounds writes are ignored
    pub fn put(&mut self, x: u32, y: u32, colour: Rgb<u8>, pen: Pen) {
        if let Some(px) = self.image.get_pixel_mut_checked(x, y) {
            *px = pen.apply(*px, colour);
        }
    }

    /// Fill every pixel whose centre lies within `radius` of `(cx, cy)`,
    /// clipped to the canvas
    pub fn fill_disk(&mut self, cx: f64, cy: f64, radius: f64, colour: Rgb<u8>, pen: Pen) {
        if cx.is_nan() || cy.is_nan() || radius.is_nan() {
            return;
        }

        let Some((x0, x1)) = clip_span(cx, radius, self.width()) else {
            return;
        };
        let Some((y0, y1)) = clip_span(cy, radius, self.height()) else {
            return;
        };

        let r2 = radius * radius;
        for y in y0..y1 {
            let dy = f64::from(y) + 0.5 - cy;
            for x in x0..x1 {
                let dx = f64::from(x) + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, colour, pen);
                }
            }
        }
    }
}

/// Pixel index range `[lo, hi)` touched by `centre ± radius` on an axis of
/// `len` pixels, or `None` when it misses the canvas
fn clip_span(centre: f64, radius: f64, len: u32) -> Option<(u32, u32)> {
    let lo = (centre - radius).floor().max(0.0);
    let hi = (centre + radius).ceil().min(f64::from(len));
    // saturating casts; both are within [0, len] here
    (lo < hi).then(|| (lo as u32, hi as u32))
}
