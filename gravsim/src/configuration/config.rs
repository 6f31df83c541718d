//! Simulation configuration and structured scenario documents.
//!
//! [`SimulationConfig`] is the single record every run is driven by. It starts
//! from [`SimulationConfig::default`] and is produced by folding the command
//! stream (see [`crate::configuration::commands`]); after the fold it is never
//! mutated again.
//!
//! [`ScenarioConfig`] is a thin, `serde`-deserializable alternative to the
//! command script. It is lowered onto the same command stream so every value
//! goes through the same validation:
//!
//! ```yaml
//! dimensions: [1024, 1024]  # canvas size in pixels
//! centre: [0.0, 0.0]        # world point at the canvas centre
//! zoom: 1.0                 # pixels per world unit
//! G: 1.0                    # gravitational constant
//! dt: 600.0                 # time step per frame
//! ti: 0.0                   # initial time
//! frames: 3001
//! merging: true
//!
//! objects:
//!   - m: 1.0
//!     radius: 2.0
//!     d: [ -40.0, 10.0 ]    # position
//!     v: [ 0.5, 0.0 ]       # velocity
//!     comment: "dust grain"
//! ```
//!
//! JSON documents with the same keys are accepted as well.

use serde::Deserialize;

use crate::configuration::commands::{build, Command};
use crate::error::{BuildError, ScenarioError};
use crate::simulation::states::Body;

/// 365.2425 days, in seconds
pub const SECONDS_PER_YEAR: f64 = 60.0 * 60.0 * 24.0 * 365.2425;

/// Newton's gravitational constant in SI units
pub const NEWTON_G: f64 = 6.67428e-11;

/// Run-wide settings, last-write-wins per field
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub width: u32,
    pub height: u32,
    pub centre_x: f64, // world x mapped to the canvas centre
    pub centre_y: f64, // world y mapped to the canvas centre
    pub frames: u64,
    pub zoom: f64, // pixels per world unit
    pub dt: f64,   // time step per frame
    pub t0: f64,   // initial simulation time
    pub g: f64,    // gravitational constant
    pub merge: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 768,
            height: 512,
            centre_x: 0.0,
            centre_y: 0.0,
            frames: 1001,
            zoom: 1.0,
            dt: SECONDS_PER_YEAR,
            t0: 0.0,
            g: NEWTON_G,
            merge: true,
        }
    }
}

impl SimulationConfig {
    /// Number of pixels in one frame
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Initial state of one body in a scenario document
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    #[serde(default = "default_mass")]
    pub m: f64, // mass
    pub radius: f64,
    #[serde(default)]
    pub d: [f64; 2], // displacement from the origin
    #[serde(default)]
    pub v: [f64; 2], // velocity
    #[serde(default)]
    pub comment: Option<String>, // ignored
}

fn default_mass() -> f64 {
    1.0
}

/// Top-level scenario document. Every key is optional and falls back to the
/// [`SimulationConfig`] default.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub dimensions: Option<[i64; 2]>,
    pub centre: Option<[f64; 2]>,
    pub frames: Option<i64>,
    pub zoom: Option<f64>,
    pub dt: Option<f64>,
    pub ti: Option<f64>,
    #[serde(rename = "G", alias = "g")]
    pub g: Option<f64>,
    pub merging: Option<bool>,
    #[serde(default)]
    pub comment: Option<String>, // ignored
    #[serde(default)]
    pub objects: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// Parse a YAML (or JSON) scenario document
    pub fn from_yaml_str(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// Lower the document onto the command stream: options first, then one
    /// `OBJECT` per body in document order.
    pub fn to_commands(&self) -> Vec<Command> {
        let mut lowered: Vec<(&str, Vec<String>)> = Vec::new();

        if let Some([w, h]) = self.dimensions {
            lowered.push(("DIMENSIONS", vec![w.to_string(), h.to_string()]));
        }
        if let Some([x, y]) = self.centre {
            lowered.push(("CENTRE", vec![x.to_string(), y.to_string()]));
        }
        if let Some(frames) = self.frames {
            lowered.push(("FRAMES", vec![frames.to_string()]));
        }
        if let Some(zoom) = self.zoom {
            lowered.push(("ZOOM", vec![zoom.to_string()]));
        }
        if let Some(dt) = self.dt {
            lowered.push(("DT", vec![dt.to_string()]));
        }
        if let Some(ti) = self.ti {
            lowered.push(("TI", vec![ti.to_string()]));
        }
        if let Some(g) = self.g {
            lowered.push(("G", vec![g.to_string()]));
        }
        if let Some(merging) = self.merging {
            lowered.push(("MERGING", vec![u8::from(merging).to_string()]));
        }
        for body in &self.objects {
            lowered.push((
                "OBJECT",
                [body.m, body.radius, body.d[0], body.d[1], body.v[0], body.v[1]]
                    .iter()
                    .map(f64::to_string)
                    .collect(),
            ));
        }

        lowered
            .into_iter()
            .enumerate()
            .map(|(index, (name, args))| Command::new(index, name, args))
            .collect()
    }

    /// Build the config and bodies this document describes
    pub fn build(&self) -> Result<(SimulationConfig, Vec<Body>), BuildError> {
        build(&self.to_commands())
    }
}

/// Parse and build a YAML (or JSON) scenario document
pub fn build_from_yaml(source: &str) -> Result<(SimulationConfig, Vec<Body>), ScenarioError> {
    let doc = ScenarioConfig::from_yaml_str(source)?;
    Ok(doc.build()?)
}
