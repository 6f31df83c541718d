//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, the set that sums its terms, and direct
//! pairwise Newtonian gravity with a minimum-separation floor

use crate::simulation::states::{SystemState, NVec2};

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    /// - returns how many pair separations had to be clamped
    pub fn accumulate_accels(&self, sys: &SystemState, out: &mut [NVec2]) -> usize {
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        self.terms
            .iter()
            .map(|term| term.acceleration(sys, out))
            .sum()
    }
}

/// Acceleration source operating on a [`SystemState`]
/// Implementations add their contribution into `out[i]` for each body and
/// report how many degenerate (clamped) interactions they hit
pub trait Acceleration {
    fn acceleration(&self, sys: &SystemState, out: &mut [NVec2]) -> usize;
}

/// Direct-sum Newtonian gravity.
///
/// Pairs are visited in ascending id then ascending partner id, and each pair
/// applies equal and opposite momentum changes, so the summation order is fixed
/// and aggregate momentum cancels.
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub min_separation: f64, // distance floor
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &SystemState, out: &mut [NVec2]) -> usize {
        let n = sys.bodies.len();
        let mut clamped = 0;

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            // bi: lower-id body of the pair
            let bi = &sys.bodies[i];

            for j in (i + 1)..n {
                // bj: higher-id body of the pair
                let bj = &sys.bodies[j];

                // r is the displacement from i to j:
                // i feels a pull along +r, j along -r
                let r = bj.x - bi.x;

                // Separation |r|, floored at min_separation.
                // Below the floor the pair counts as clamped; the caller
                // reports it but the step goes on
                let mut d = r.norm();
                if d < self.min_separation {
                    d = self.min_separation;
                    clamped += 1;
                }

                // Newtonian acceleration on i from j:
                //   a_i = G * m_j * r / |r|^3
                // so coef = G / d^3 with d standing in for |r|.
                // With d >= |r| the magnitude G m |r| / d^3 stays finite and
                // vanishes for coincident bodies
                let coef = self.G / (d * d * d);

                // Apply Newton's law, equal and opposite:
                // a_i +=  G * m_j * r / d^3
                // a_j += -G * m_i * r / d^3
                out[i] += coef * bj.m * r;
                out[j] -= coef * bi.m * r;
            }
        }

        clamped
    }
}
