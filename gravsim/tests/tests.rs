use approx::assert_relative_eq;

use gravsim::simulation::params::{Parameters, MIN_SEPARATION};
use gravsim::{build_from_script, AccelSet, Body, IntegratorConfig, NVec2, NewtonianGravity, Scenario, Simulator, SimulationConfig, SystemState};

/// Build a simple 2-body system separated along the x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> SystemState {
    let b1 = Body {
        id: 0,
        x: NVec2::new(-dist / 2.0, 0.0),
        v: NVec2::zeros(),
        m: m1,
        radius: 0.01,
    };
    let b2 = Body {
        id: 1,
        x: NVec2::new(dist / 2.0, 0.0),
        v: NVec2::zeros(),
        m: m2,
        radius: 0.01,
    };
    SystemState::new(vec![b1, b2], 0.0)
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        dt: 0.001,
        G: 0.1,
        min_separation: MIN_SEPARATION,
        merge: true,
        integrator: IntegratorConfig::SymplecticEuler,
    }
}

/// Build a gravity term + AccelSet
pub fn gravity_set(p: &Parameters) -> AccelSet {
    AccelSet::new().with(NewtonianGravity {
        G: p.G,
        min_separation: p.min_separation,
    })
}

/// Every snapshot of a script's run
fn snapshots(script: &str, integrator: IntegratorConfig) -> Vec<SystemState> {
    let (cfg, bodies) = build_from_script(script).unwrap();
    simulate(&cfg, &bodies, integrator)
}

fn simulate(cfg: &SimulationConfig, bodies: &[Body], integrator: IntegratorConfig) -> Vec<SystemState> {
    let scenario = Scenario::build_scenario(cfg, bodies).with_integrator(integrator);
    Simulator::new(scenario)
        .snapshots(cfg.frames)
        .map(|(_, state)| state)
        .collect()
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(1.0, 2.0, 3.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(&sys, &mut acc);

    let net = acc[0] * sys.bodies[0].m + acc[1] * sys.bodies[1].m;

    assert!(net.norm() < 1e-12, "Net momentum not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0, 1.0, 1.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(&sys, &mut acc);

    let dx = sys.bodies[1].x - sys.bodies[0].x;
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
    assert!(acc[1].dot(&dx) < 0.0, "Acceleration is not toward first body");
}

#[test]
fn gravity_magnitude_is_g_m_over_d_squared() {
    let sys = two_body_system(2.0, 3.0, 5.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(&sys, &mut acc);

    assert_relative_eq!(acc[0].norm(), 0.1 * 5.0 / 4.0, max_relative = 1e-12);
    assert_relative_eq!(acc[1].norm(), 0.1 * 3.0 / 4.0, max_relative = 1e-12);
}

#[test]
fn gravity_inverse_square_law() {
    let sys_r = two_body_system(1.0, 1.0, 1.0);
    let sys_2r = two_body_system(2.0, 1.0, 1.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut acc_r = vec![NVec2::zeros(); 2];
    let mut acc_2r = vec![NVec2::zeros(); 2];

    forces.accumulate_accels(&sys_r, &mut acc_r);
    forces.accumulate_accels(&sys_2r, &mut acc_2r);

    let ratio = acc_r[0].norm() / acc_2r[0].norm();

    assert!((ratio - 4.0).abs() < 1e-9, "Expected 4x, got {}", ratio);
}

#[test]
fn gravity_floor_prevents_blowup() {
    let mut p = test_params();
    p.min_separation = 1e-3;

    let sys = two_body_system(1e-12, 1.0, 1.0);
    let forces = gravity_set(&p);

    let mut acc = vec![NVec2::zeros(); 2];
    let clamped = forces.accumulate_accels(&sys, &mut acc);

    assert_eq!(clamped, 1);
    assert!(acc[0].norm() <= p.G / (p.min_separation * p.min_separation), "Floor failed; acceleration too large");
}

// ==================================================================================
// Integrator tests
// ==================================================================================

const BINARY_ORBIT: &str = "
    G 1
    FRAMES 4001
    DT 0.0015707963267948966   # 2 pi / 4000
    OBJECT 4 0.1 -1 0 0  1
    OBJECT 4 0.1  1 0 0 -1
";

#[test]
fn circular_orbit_returns_after_one_period() {
    for integrator in [IntegratorConfig::SymplecticEuler, IntegratorConfig::Verlet] {
        let frames = snapshots(BINARY_ORBIT, integrator);
        assert_eq!(frames.len(), 4001);

        let first = &frames[0];
        let last = &frames[4000];
        assert_eq!(last.bodies.len(), 2);
        for (start, end) in first.bodies.iter().zip(&last.bodies) {
            assert!(
                (end.x - start.x).norm() < 1e-2,
                "{integrator}: body {} ended at {:?}, started at {:?}",
                start.id,
                end.x,
                start.x
            );
        }
    }
}

#[test]
fn orbit_stays_on_its_circle() {
    let frames = snapshots(BINARY_ORBIT, IntegratorConfig::SymplecticEuler);
    for state in frames.iter().step_by(100) {
        let separation = (state.bodies[1].x - state.bodies[0].x).norm();
        assert!((separation - 2.0).abs() < 1e-2, "separation drifted to {separation}");
    }
}

#[test]
fn momentum_is_conserved_without_mergers() {
    let frames = snapshots(
        "G 1 DT 0.001 FRAMES 200 MERGING 0
         OBJECT 1 0.01  0  0  0.3  0
         OBJECT 2 0.01  1  0  0    0.5
         OBJECT 3 0.01  0  2 -0.2  0",
        IntegratorConfig::SymplecticEuler,
    );

    let p0 = frames[0].total_momentum();
    for state in &frames {
        assert_eq!(state.bodies.len(), 3);
        assert!((state.total_momentum() - p0).norm() < 1e-10);
    }
}

#[test]
fn time_advances_by_dt_per_frame() {
    let frames = snapshots("TI 100 DT 0.5 FRAMES 4 OBJECT 1 1 0 0 0 0", IntegratorConfig::SymplecticEuler);
    let times: Vec<f64> = frames.iter().map(|s| s.t).collect();
    assert_eq!(times, [100.0, 100.5, 101.0, 101.5]);
}

#[test]
fn runs_are_bit_identical() {
    let script = "G 1 DT 0.01 FRAMES 300
        OBJECT 1 0.05 -1 0 0 0.4
        OBJECT 1 0.05  1 0 0 -0.4
        OBJECT 0.5 0.2 0 0.3 0 0";
    let a = snapshots(script, IntegratorConfig::SymplecticEuler);
    let b = snapshots(script, IntegratorConfig::SymplecticEuler);
    assert_eq!(a, b);
}

#[test]
fn initial_bodies_are_not_mutated() {
    let (cfg, bodies) = build_from_script("G 1 DT 0.1 FRAMES 10 OBJECT 1 0.1 0 0 1 0 OBJECT 1 0.1 5 0 0 0").unwrap();
    let before = bodies.clone();
    let frames = simulate(&cfg, &bodies, IntegratorConfig::SymplecticEuler);

    assert_eq!(bodies, before);
    assert_eq!(frames[0].bodies, before);
    assert_ne!(frames[9].bodies, before);
}

#[test]
fn zero_frames_take_no_steps() {
    assert!(snapshots("FRAMES 0 OBJECT 1 1 0 0 0 0", IntegratorConfig::SymplecticEuler).is_empty());
}

#[test]
fn empty_system_still_yields_every_frame() {
    let frames = snapshots("FRAMES 7", IntegratorConfig::Verlet);
    assert_eq!(frames.len(), 7);
    assert!(frames.iter().all(|s| s.bodies.is_empty()));
}

// ==================================================================================
// Collision tests
// ==================================================================================

// Gravity off so the bodies coast: centres are 20 - 2k apart after k steps,
// within the summed radii (3) from frame 9 on
const HEAD_ON: &str = "
    G 0 DT 1 FRAMES 12
    OBJECT 1 1 -10 0  1 0
    OBJECT 3 2  10 0 -1 0
";

#[test]
fn without_merging_bodies_pass_through_each_other() {
    let frames = snapshots(&format!("MERGING 0 {HEAD_ON}"), IntegratorConfig::SymplecticEuler);

    assert_eq!(frames.len(), 12);
    for state in &frames {
        assert_eq!(state.bodies.len(), 2);
        assert_eq!(state.bodies[0].v, NVec2::new(1.0, 0.0));
        assert_eq!(state.bodies[1].v, NVec2::new(-1.0, 0.0));
    }

    let impact = &frames[9];
    let gap = (impact.bodies[1].x - impact.bodies[0].x).norm();
    assert!(gap <= 3.0, "bodies should overlap at impact, gap {gap}");
    assert_eq!(frames[10].bodies[0].x, frames[10].bodies[1].x);
}

#[test]
fn merging_replaces_the_pair_with_one_body() {
    let frames = snapshots(&format!("MERGING 1 {HEAD_ON}"), IntegratorConfig::SymplecticEuler);

    assert_eq!(frames[8].bodies.len(), 2);
    for state in &frames[9..] {
        assert_eq!(state.bodies.len(), 1);
    }

    // the parents are gone and the result is looked up by its fresh id
    assert!(frames[8].body(0).is_some());
    assert!(frames[9].body(0).is_none() && frames[9].body(1).is_none());
    let merged = frames[9].body(2).unwrap();
    assert_eq!(merged, &frames[9].bodies[0]);
    assert_eq!(merged.id, 2);
    assert_eq!(merged.m, 4.0);
    assert_relative_eq!(merged.radius, 9.0_f64.cbrt(), max_relative = 1e-12);
    // momentum: 1 * 1 + 3 * -1 = -2
    assert_relative_eq!(merged.v.x, -0.5, epsilon = 1e-12);
    // centre of mass of -1 (m 1) and 1 (m 3)
    assert_relative_eq!(merged.x.x, 0.5, epsilon = 1e-12);
    assert!(merged.radius >= 2.0);
}

#[test]
fn mergers_conserve_mass_and_momentum() {
    let script = "G 1 DT 0.01 FRAMES 400 MERGING 1
        OBJECT 1   0.2  -2    0  0  0.05
        OBJECT 2   0.3  -0.5  0  0 -0.05
        OBJECT 0.5 0.1   1    0  0  0.02
        OBJECT 1.5 0.25  2.5  0  0  0";
    let frames = snapshots(script, IntegratorConfig::SymplecticEuler);

    let m0 = frames[0].total_mass();
    let p0 = frames[0].total_momentum();
    let last = frames.last().unwrap();
    assert!(last.bodies.len() < 4, "expected at least one merger");

    for state in &frames {
        assert_relative_eq!(state.total_mass(), m0, max_relative = 1e-12);
        assert!((state.total_momentum() - p0).norm() < 1e-9);
    }

    // merged ids are fresh and the live set stays sorted
    for state in &frames {
        assert!(state.bodies.windows(2).all(|w| w[0].id < w[1].id));
    }
}

#[test]
fn merged_radius_never_shrinks() {
    let frames = snapshots(
        "G 0 DT 1 FRAMES 3
         OBJECT 1 5   0 0 0 0
         OBJECT 1 0.1 1 0 0 0
         OBJECT 1 0.1 2 0 0 0",
        IntegratorConfig::SymplecticEuler,
    );
    // everything overlaps from the first step and collapses into one body
    let merged = &frames[1].bodies;
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id, 4);
    assert!(merged[0].radius >= 5.0);
}

#[test]
fn step_reports_collisions_and_merges() {
    let (cfg, bodies) = build_from_script(&format!("MERGING 0 {HEAD_ON}")).unwrap();
    let mut sim = Simulator::new(Scenario::build_scenario(&cfg, &bodies));
    let reports: Vec<_> = (0..11).map(|_| sim.step()).collect();

    assert_eq!(sim.steps(), 11);
    assert_eq!(reports[7].collisions, 0);
    assert_eq!(reports[8].collisions, 1); // step 9
    assert!(reports.iter().all(|r| r.merges == 0));
    // step 11 starts from the coincident frame-10 positions
    assert_eq!(reports[10].clamped_pairs, 1);
    assert_eq!(reports[9].clamped_pairs, 0);
}
