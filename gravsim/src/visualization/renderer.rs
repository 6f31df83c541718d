//! Rasterize `SystemState` snapshots.
//!
//! World space is y-up; the canvas is y-down with `CENTRE` at its middle and
//! `ZOOM` pixels per world unit.

use crate::configuration::config::SimulationConfig;
use crate::simulation::states::{SystemState, NVec2};
use crate::visualization::palette::{from_unit_rgba, spectrum, Gradient, Rgb, BLACK, WHITE};
use crate::visualization::raster::{Pen, Raster};

/// Bodies never shrink below this many pixels across their radius
const MIN_DISK_RADIUS: f64 = 1.0;

/// World-to-pixel projection
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub centre: NVec2,
    pub zoom: f64, // pixels per world unit
}

impl Viewport {
    pub fn from_config(cfg: &SimulationConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            centre: NVec2::new(cfg.centre_x, cfg.centre_y),
            zoom: cfg.zoom,
        }
    }

    /// Continuous pixel coordinates of a world point
    pub fn project(&self, p: &NVec2) -> (f64, f64) {
        let px = f64::from(self.width) / 2.0 + (p.x - self.centre.x) * self.zoom;
        let py = f64::from(self.height) / 2.0 - (p.y - self.centre.y) * self.zoom;
        (px, py)
    }

    /// On-canvas radius of a body
    pub fn disk_radius(&self, radius: f64) -> f64 {
        (radius * self.zoom).max(MIN_DISK_RADIUS)
    }

    /// Draw every body of `sys`, in ascending id order
    fn draw(&self, sys: &SystemState, raster: &mut Raster, colour: Rgb<u8>, pen: Pen) {
        for body in &sys.bodies {
            let (px, py) = self.project(&body.x);
            raster.fill_disk(px, py, self.disk_radius(body.radius), colour, pen);
        }
    }
}

/// Turns each snapshot into one frame: white disks on black
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    viewport: Viewport,
    background: Rgb<u8>,
    foreground: Rgb<u8>,
}

impl FrameRenderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: BLACK,
            foreground: WHITE,
        }
    }

    pub fn from_config(cfg: &SimulationConfig) -> Self {
        Self::new(Viewport::from_config(cfg))
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn render(&self, sys: &SystemState) -> Raster {
        let mut raster = Raster::new(self.viewport.width, self.viewport.height, self.background);
        self.viewport.draw(sys, &mut raster, self.foreground, Pen::Replace);
        raster
    }
}

/// Long-exposure composite of a whole run.
///
/// Each frame's bodies are painted over the same raster with a max pen,
/// coloured by how far through the run the frame is, so trails fade in and
/// out along the spectrum.
#[derive(Debug, Clone)]
pub struct Exposure {
    viewport: Viewport,
    gradient: Gradient,
    frames: u64,
    raster: Raster,
}

impl Exposure {
    pub fn new(viewport: Viewport, frames: u64) -> Self {
        let raster = Raster::new(viewport.width, viewport.height, BLACK);
        Self {
            viewport,
            gradient: spectrum(),
            frames,
            raster,
        }
    }

    pub fn from_config(cfg: &SimulationConfig) -> Self {
        Self::new(Viewport::from_config(cfg), cfg.frames)
    }

    /// Position of `frame` in the run, in `[0, 1]`
    fn progress(&self, frame: u64) -> f64 {
        if self.frames > 1 {
            frame as f64 / (self.frames - 1) as f64
        } else {
            0.5
        }
    }

    pub fn add(&mut self, frame: u64, sys: &SystemState) {
        let rgba = self.gradient.sample(self.progress(frame));
        if rgba[3] <= 0.0 {
            return;
        }
        self.viewport.draw(sys, &mut self.raster, from_unit_rgba(rgba), Pen::Max);
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }
}
