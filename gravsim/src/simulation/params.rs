//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size and scheme,
//! - gravitational constant `G` and the minimum-separation floor,
//! - whether colliding bodies merge

use crate::configuration::config::SimulationConfig;
use crate::simulation::integrator::IntegratorConfig;

/// Separations below this are clamped before computing `1 / d^2`
pub const MIN_SEPARATION: f64 = 1.0e-9;

#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct Parameters {
    pub dt: f64, // step size
    pub G: f64, // gravitational constant
    pub min_separation: f64, // distance floor
    pub merge: bool, // merge colliding bodies
    pub integrator: IntegratorConfig,
}

impl Parameters {
    pub fn from_config(cfg: &SimulationConfig) -> Self {
        Self {
            dt: cfg.dt,
            G: cfg.g,
            min_separation: MIN_SEPARATION,
            merge: cfg.merge,
            integrator: IntegratorConfig::default(),
        }
    }
}
