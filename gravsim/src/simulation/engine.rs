//! Simulation driver
//!
//! Owns the evolving `SystemState` and advances it one frame at a time:
//! integrate, detect collisions, merge (if enabled). Frame 0 is the initial
//! state, so `frames` snapshots take `frames - 1` steps.

use log::{debug, warn};

use crate::simulation::collisions::{count_collisions, resolve_mergers};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::SystemState;

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub collisions: usize, // colliding pairs after integration
    pub merges: usize,
    pub clamped_pairs: usize, // separations floored to the minimum
}

pub struct Simulator {
    scenario: Scenario,
    steps: u64,
}

impl Simulator {
    pub fn new(scenario: Scenario) -> Self {
        Self { scenario, steps: 0 }
    }

    pub fn state(&self) -> &SystemState {
        &self.scenario.system
    }

    /// Integration steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advance the system by one `dt`
    pub fn step(&mut self) -> StepReport {
        let Scenario {
            system,
            parameters,
            forces,
        } = &mut self.scenario;

        let clamped_pairs = parameters.integrator.step(system, forces, parameters);
        self.steps += 1;

        if clamped_pairs > 0 {
            warn!(
                "step {}: {} pair separation(s) below {} clamped",
                self.steps, clamped_pairs, parameters.min_separation
            );
        }

        let collisions = count_collisions(system);
        let merges = if parameters.merge && collisions > 0 {
            resolve_mergers(system)
        } else {
            0
        };

        if collisions > 0 {
            debug!(
                "step {}: {} colliding pair(s), {} merger(s), {} bodies left",
                self.steps,
                collisions,
                merges,
                system.bodies.len()
            );
        }

        StepReport {
            collisions,
            merges,
            clamped_pairs,
        }
    }

    /// Iterate over `frames` snapshots, starting with the initial state
    pub fn snapshots(self, frames: u64) -> Snapshots {
        Snapshots {
            sim: self,
            frames,
            next_frame: 0,
        }
    }
}

/// Iterator of per-frame `(frame index, snapshot)` pairs
pub struct Snapshots {
    sim: Simulator,
    frames: u64,
    next_frame: u64,
}

impl Iterator for Snapshots {
    type Item = (u64, SystemState);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_frame >= self.frames {
            return None;
        }
        if self.next_frame > 0 {
            self.sim.step();
        }
        let frame = self.next_frame;
        self.next_frame += 1;
        Some((frame, self.sim.state().clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.frames - self.next_frame).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Snapshots {}
