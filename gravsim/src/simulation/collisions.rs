//! Collision detection and momentum-conserving mergers
//!
//! Two bodies collide when their centres are no further apart than the sum of
//! their radii. A merger conserves
//! - total mass: m' = m_a + m_b
//! - momentum: m' v' = m_a v_a + m_b v_b
//! - volume, assuming uniform density: r' = cbrt(r_a^3 + r_b^3)
//! and places the result at the pair's centre of mass.

use log::debug;

use crate::simulation::states::{Body, SystemState};

fn overlapping(a: &Body, b: &Body) -> bool {
    (b.x - a.x).norm() <= a.radius + b.radius
}

/// Count every colliding pair in the current state
pub fn count_collisions(sys: &SystemState) -> usize {
    let bodies = &sys.bodies;
    (0..bodies.len())
        .map(|i| {
            bodies[i + 1..]
                .iter()
                .filter(|other| overlapping(&bodies[i], other))
                .count()
        })
        .sum()
}

/// Colliding pair with the lowest `(min id, max id)` key, as indices.
///
/// Bodies are kept sorted by id, so the first hit in `(i, j)` order is it.
pub fn first_collision(sys: &SystemState) -> Option<(usize, usize)> {
    let bodies = &sys.bodies;
    (0..bodies.len()).find_map(|i| {
        (i + 1..bodies.len())
            .find(|&j| overlapping(&bodies[i], &bodies[j]))
            .map(|j| (i, j))
    })
}

/// Combine two bodies into one carrying `new_id`
pub fn merge_bodies(a: &Body, b: &Body, new_id: u64) -> Body {
    let m = a.m + b.m;
    Body {
        id: new_id,
        x: (a.m * a.x + b.m * b.x) / m,
        v: (a.momentum() + b.momentum()) / m,
        m,
        radius: (a.radius.powi(3) + b.radius.powi(3)).cbrt(),
    }
}

/// Merge colliding pairs, lowest id pair first, until nothing overlaps.
///
/// A fresh body can immediately overlap a third one, so this loops rather
/// than making one pass. Returns the number of mergers.
pub fn resolve_mergers(sys: &mut SystemState) -> usize {
    let mut merges = 0;

    while let Some((i, j)) = first_collision(sys) {
        // j > i, remove the later index first
        let b = sys.bodies.remove(j);
        let a = sys.bodies.remove(i);
        let id = sys.fresh_id();
        let merged = merge_bodies(&a, &b, id);

        debug!(
            "t = {}: bodies {} and {} merged into {} (mass {}, radius {})",
            sys.t, a.id, b.id, merged.id, merged.m, merged.radius
        );

        // fresh ids are the largest, so pushing keeps the id order
        sys.bodies.push(merged);
        merges += 1;
    }

    merges
}
