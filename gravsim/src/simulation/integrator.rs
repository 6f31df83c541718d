//! Fixed-step time integrators for the N-body system
//!
//! Provides a symplectic (semi-implicit) Euler step and a velocity-Verlet
//! step, both driven by `AccelSet` and `Parameters`. Each returns the number
//! of clamped pair separations it ran into.

use std::fmt;
use std::str::FromStr;

use super::forces::AccelSet;
use super::params::Parameters;
use super::states::{SystemState, NVec2};

/// Which integrator the engine advances the system with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntegratorConfig {
    /// Kick then drift, one force evaluation per step
    #[default]
    SymplecticEuler,

    /// Kick-drift-kick, two force evaluations per step
    Verlet,
}

impl IntegratorConfig {
    /// Advance `sys` by one step of `params.dt`
    pub fn step(self, sys: &mut SystemState, forces: &AccelSet, params: &Parameters) -> usize {
        match self {
            Self::SymplecticEuler => symplectic_euler(sys, forces, params),
            Self::Verlet => verlet_integrator(sys, forces, params),
        }
    }
}

impl FromStr for IntegratorConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euler" => Ok(Self::SymplecticEuler),
            "verlet" => Ok(Self::Verlet),
            other => Err(format!("unknown integrator `{other}` (expected `euler` or `verlet`)")),
        }
    }
}

impl fmt::Display for IntegratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymplecticEuler => f.write_str("euler"),
            Self::Verlet => f.write_str("verlet"),
        }
    }
}

/// Advance the system by one step using semi-implicit Euler
/// v_n+1 = v_n + dt a(x_n), then x_n+1 = x_n + dt v_n+1
pub fn symplectic_euler(sys: &mut SystemState, forces: &AccelSet, params: &Parameters) -> usize {
    let dt = params.dt;
    let mut acc = vec![NVec2::zeros(); sys.bodies.len()];
    let clamped = forces.accumulate_accels(sys, &mut acc);

    for (b, a) in sys.bodies.iter_mut().zip(acc.iter()) {
        b.v += dt * *a;
        b.x += dt * b.v;
    }

    sys.t += dt;
    clamped
}

/// Advance the system by one step using velocity-Verlet
/// Uses two force evaluations per step and updates positions, velocities,
/// and `sys.t` in-place
pub fn verlet_integrator(sys: &mut SystemState, forces: &AccelSet, params: &Parameters) -> usize {
    let n = sys.bodies.len();
    let dt = params.dt;
    let half_dt = 0.5 * dt;

    // Kick: v_n+1/2 = v_n + (dt/2) a_n
    let mut a_old = vec![NVec2::zeros(); n];
    let mut clamped = forces.accumulate_accels(sys, &mut a_old);
    for (b, a) in sys.bodies.iter_mut().zip(a_old.iter()) {
        b.v += half_dt * *a;
    }

    // Drift: x_n+1 = x_n + dt v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.x += dt * b.v;
    }

    sys.t += dt;

    // Kick: v_n+1 = v_n+1/2 + (dt/2) a_n+1
    let mut a_new = vec![NVec2::zeros(); n];
    clamped += forces.accumulate_accels(sys, &mut a_new);
    for (b, a) in sys.bodies.iter_mut().zip(a_new.iter()) {
        b.v += half_dt * *a;
    }

    clamped
}
