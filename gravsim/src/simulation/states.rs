//! Core state types for the N-body simulation.
//!
//! - `Body`        a point mass with a collision/render radius
//! - `SystemState` the live bodies (ascending `id`) and the current time `t`
//!
//! Bodies are addressed by `id`, never by index: a merge removes two bodies
//! and appends a fresh one, so indices shift but ids stay put.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: u64, // creation order, tie-breaking only
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub radius: f64, // radius (collision and rendering)
}

impl Body {
    pub fn momentum(&self) -> NVec2 {
        self.m * self.v
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemState {
    pub bodies: Vec<Body>, // sorted by id
    pub t: f64, // time
    next_id: u64,
}

impl SystemState {
    /// Seed a state from the builder's bodies.
    ///
    /// Bodies are sorted by `id`; the next fresh id is one past the largest.
    pub fn new(mut bodies: Vec<Body>, t: f64) -> Self {
        bodies.sort_by_key(|b| b.id);
        let next_id = bodies.last().map_or(0, |b| b.id + 1);
        Self { bodies, t, next_id }
    }

    /// Hand out an id no body has ever had
    pub fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().fold(NVec2::zeros(), |p, b| p + b.momentum())
    }

    pub fn body(&self, id: u64) -> Option<&Body> {
        self.bodies
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.bodies[i])
    }
}
