//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a built `SimulationConfig` plus the initial bodies and produces the
//! runtime bundle (`Scenario`) containing:
//! - numerical parameters (`Parameters`)
//! - system state (`SystemState` with bodies at t = TI)
//! - active force set (`AccelSet`)
//!
//! The config and body list are only read; the scenario owns its own copy.

use crate::configuration::config::SimulationConfig;
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::IntegratorConfig;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, SystemState};

pub struct Scenario {
    pub parameters: Parameters,
    pub system: SystemState,
    pub forces: AccelSet,
}

impl Scenario {
    pub fn build_scenario(cfg: &SimulationConfig, bodies: &[Body]) -> Self {
        let parameters = Parameters::from_config(cfg);
        let system = SystemState::new(bodies.to_vec(), cfg.t0);

        let forces = AccelSet::new().with(NewtonianGravity {
            G: parameters.G,
            min_separation: parameters.min_separation,
        });

        Self {
            parameters,
            system,
            forces,
        }
    }

    /// Swap the integration scheme
    pub fn with_integrator(mut self, integrator: IntegratorConfig) -> Self {
        self.parameters.integrator = integrator;
        self
    }
}
