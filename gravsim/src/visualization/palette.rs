//! Colours and colour gradients
//!
//! Frames use a fixed palette: black background, white bodies. The
//! long-exposure composite colours each frame by its position in the run,
//! sampled from [`spectrum`].

pub use image::Rgb;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Unit-range colour scaled by its alpha, truncated to bytes
pub fn from_unit_rgba([r, g, b, a]: [f64; 4]) -> Rgb<u8> {
    let channel = |c: f64| (c * a * 255.0).clamp(0.0, 255.0) as u8;
    Rgb([channel(r), channel(g), channel(b)])
}

/// Piecewise-linear RGBA gradient over `[0, 1]`
#[derive(Debug, Clone)]
pub struct Gradient {
    stops: Vec<(f64, [f64; 4])>, // sorted by position
}

impl Gradient {
    pub fn new(mut stops: Vec<(f64, [f64; 4])>) -> Self {
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { stops }
    }

    /// Colour at `point`, clamped to the first/last stop outside their range
    pub fn sample(&self, point: f64) -> [f64; 4] {
        let Some(&(first_point, first_colour)) = self.stops.first() else {
            return [0.0; 4];
        };
        if point <= first_point {
            return first_colour;
        }

        for pair in self.stops.windows(2) {
            let (p0, c0) = pair[0];
            let (p1, c1) = pair[1];
            if point > p1 {
                continue;
            }
            let t = if p1 > p0 { (point - p0) / (p1 - p0) } else { 0.5 };
            let mut out = [0.0; 4];
            for (k, slot) in out.iter_mut().enumerate() {
                *slot = (1.0 - t) * c0[k] + t * c1[k];
            }
            return out;
        }

        self.stops.last().map_or([0.0; 4], |&(_, colour)| colour)
    }
}

/// Fades in from transparent purple, runs blue, cyan, green, yellow, red and
/// fades out to purple again, so every channel reaches full intensity
/// somewhere and a body that never moves ends up white under a max pen.
pub fn spectrum() -> Gradient {
    Gradient::new(vec![
        (0.0 / 6.0, [0.5, 0.0, 0.5, 0.0]),
        (1.0 / 6.0, [0.0, 0.0, 1.0, 1.0]),
        (2.0 / 6.0, [0.0, 0.5, 0.5, 1.0]),
        (3.0 / 6.0, [0.0, 1.0, 0.0, 1.0]),
        (4.0 / 6.0, [0.5, 0.5, 0.0, 1.0]),
        (5.0 / 6.0, [1.0, 0.0, 0.0, 1.0]),
        (6.0 / 6.0, [0.5, 0.0, 0.5, 0.0]),
    ])
}
