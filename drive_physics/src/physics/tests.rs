#![cfg(test)]

use approx::assert_relative_eq;
use drive_common::{HeldKeys, LogicalKey, ObstacleId, ObstacleLayout, Real, Vec2, Vec3};

use crate::config::{BodyConfig, BoundaryConfig, CameraConfig, ControlConfig};
use crate::physics::Simulation;
use crate::store::GameStore;
use crate::world::WorldSetup;

const DT: Real = 1.0 / 60.0;

fn open_world() -> WorldSetup {
    WorldSetup::from_layout(&"".parse::<ObstacleLayout>().unwrap(), 3.0, BoundaryConfig::default()).unwrap()
}

fn sim_with(body: BodyConfig, world: WorldSetup) -> Simulation {
    Simulation::new(body, CameraConfig::default(), world).unwrap()
}

fn forward() -> HeldKeys {
    HeldKeys::empty().with(LogicalKey::Forward)
}

#[test]
fn holding_forward_accelerates_toward_negative_z() {
    let mut sim = sim_with(BodyConfig::default(), open_world());
    let mut store = GameStore::default();
    for _ in 0..60 {
        let report = sim.step(&mut store, forward(), DT);
        assert!(report.ran_physics);
        assert!(!report.speed_capped);
    }
    let body = sim.body();
    assert!(body.position.z < 0.0);
    assert_relative_eq!(body.position.x, 0.0, epsilon = 1e-5);
    assert!(body.speed() > 0.0 && body.speed() < 16.0);
    assert!(body.speed() < store.controls().max_speed);
    assert_relative_eq!(store.speed(), body.speed());
}

#[test]
fn tree_contact_snaps_to_shell_and_reverses() {
    let layout: ObstacleLayout = "0,-10".parse().unwrap();
    let world = WorldSetup::from_layout(&layout, 3.0, BoundaryConfig::default()).unwrap();
    let body = BodyConfig { linear_damping: 1.0, ..Default::default() };
    let mut sim = sim_with(body, world);
    let mut store = GameStore::default();

    sim.body.position = Vec3::new(0.0, 0.5, -8.0);
    sim.body.velocity = Vec3::new(0.0, 0.0, -10.0);

    let report = sim.step(&mut store, HeldKeys::empty(), DT);
    assert_eq!(report.collisions, vec![ObstacleId(0)]);
    let b = sim.body();
    assert_relative_eq!(b.position.z, -7.0, epsilon = 1e-4);
    assert_relative_eq!(b.position.y, 0.5);
    assert_relative_eq!(b.velocity.z, 3.0, epsilon = 1e-4);
    assert_eq!(sim.contacts().total(), 1);
    assert_eq!(sim.contacts().last().map(|c| c.obstacle), Some(ObstacleId(0)));

    for _ in 0..30 {
        let report = sim.step(&mut store, HeldKeys::empty(), DT);
        assert!(report.collisions.is_empty());
        let d = (Vec2::new(sim.body().position.x, sim.body().position.z) - Vec2::new(0.0, -10.0)).norm();
        assert!(d >= 3.0 - 1e-4);
    }
    assert!(sim.body().position.z > -7.0);
}

#[test]
fn overlapping_trees_resolve_in_list_order() {
    let layout: ObstacleLayout = "0,-2; 0,2".parse().unwrap();
    let world = WorldSetup::from_layout(&layout, 3.0, BoundaryConfig::default()).unwrap();
    let mut sim = sim_with(BodyConfig::default(), world);
    let mut store = GameStore::default();
    sim.body.position = Vec3::new(0.5, 0.5, 0.0);

    let report = sim.step(&mut store, HeldKeys::empty(), DT);
    assert_eq!(report.collisions, vec![ObstacleId(0), ObstacleId(1)]);

    let p = sim.body().position;
    let planar = Vec2::new(p.x, p.z);
    // the last tree pushed the body back inside the first
    assert_relative_eq!((planar - Vec2::new(0.0, 2.0)).norm(), 3.0, epsilon = 1e-4);
    assert!((planar - Vec2::new(0.0, -2.0)).norm() < 3.0);
    assert_relative_eq!(p.x, 1.666, epsilon = 1e-3);
    assert_relative_eq!(p.z, -0.495, epsilon = 1e-3);
    assert_relative_eq!(p.y, 0.5);

    let ids: Vec<ObstacleId> = sim.contacts().recent().map(|c| c.obstacle).collect();
    assert_eq!(ids, vec![ObstacleId(0), ObstacleId(1)]);
}

#[test]
fn boundary_clamps_and_bounces() {
    let mut sim = sim_with(BodyConfig::default(), open_world());
    let mut store = GameStore::default();
    sim.body.position = Vec3::new(100.0, 0.5, 0.0);
    sim.body.velocity = Vec3::new(10.0, 0.0, 0.0);

    let report = sim.step(&mut store, HeldKeys::empty(), DT);
    assert!(report.boundary.x);
    assert!(!report.boundary.z);
    assert_relative_eq!(sim.body().position.x, 95.0);
    // damped once before the bounce
    assert_relative_eq!(sim.body().velocity.x, -10.0 * 0.96 * 0.3, epsilon = 1e-4);
}

#[test]
fn speed_never_exceeds_cap() {
    let mut sim = sim_with(BodyConfig::default(), open_world());
    let mut store = GameStore::default();
    store
        .replace_controls(ControlConfig { acceleration: 5000.0, max_speed: 20.0, ..Default::default() })
        .unwrap();
    let mut capped = false;
    for _ in 0..120 {
        let report = sim.step(&mut store, forward(), DT);
        capped |= report.speed_capped;
        assert!(sim.body().speed() <= 20.0 + 1e-3);
    }
    assert!(capped);
}

#[test]
fn paused_store_freezes_body_but_not_camera() {
    let mut sim = sim_with(BodyConfig::default(), open_world());
    let mut store = GameStore::default();
    sim.step(&mut store, forward(), DT);
    let before = sim.body().clone();
    let camera_before = sim.camera().position();

    store.set_paused(true);
    let report = sim.step(&mut store, forward(), DT);
    assert!(!report.ran_physics);
    assert_eq!(report.wheel_spin, 0.0);
    assert_eq!(sim.body(), &before);
    assert_ne!(sim.camera().position(), camera_before);
    assert_eq!(report.tick, 2);
}

#[test]
fn unusable_frame_times_skip_physics() {
    let mut sim = sim_with(BodyConfig::default(), open_world());
    let mut store = GameStore::default();
    let start = sim.body().clone();
    for dt in [0.0, -0.5, Real::NAN, Real::INFINITY] {
        let report = sim.step(&mut store, forward(), dt);
        assert!(!report.ran_physics);
        assert_eq!(report.dt, 0.0);
    }
    assert_eq!(sim.body(), &start);
}

#[test]
fn long_frame_is_capped() {
    let mut sim = sim_with(BodyConfig::default(), open_world());
    let mut store = GameStore::default();
    let report = sim.step(&mut store, forward(), 10.0);
    assert!(report.ran_physics);
    assert_relative_eq!(report.dt, 0.1);
    assert!(sim.body().position.iter().all(|c| c.is_finite()));
    assert!(sim.body().position.z.abs() <= 95.0);
}

#[test]
fn force_applied_then_zero_step_is_discarded() {
    let mut sim = sim_with(BodyConfig::default(), open_world());
    sim.body.apply_force(Vec3::new(0.0, 0.0, -100.0));
    sim.body.integrate(0.0);
    assert_eq!(sim.body().accumulated_acceleration(), Vec3::zeros());
    assert_eq!(sim.body().velocity, Vec3::zeros());
}

#[test]
fn reset_restores_spawn_and_session() {
    let mut sim = Simulation::reference().unwrap();
    let mut store = GameStore::default();
    for _ in 0..30 {
        sim.step(&mut store, forward().with(LogicalKey::TurnLeft), DT);
    }
    store.set_paused(true);
    sim.reset(&mut store).unwrap();

    assert_eq!(sim.body().position, BodyConfig::default().spawn);
    assert_eq!(sim.body().velocity, Vec3::zeros());
    assert_eq!(sim.body().heading, 0.0);
    assert_eq!(sim.camera().position(), CameraConfig::default().initial_position);
    assert!(sim.contacts().is_empty());
    assert!(!store.paused());
    assert_eq!(store.speed(), 0.0);
}

#[test]
fn snapshot_reflects_state() {
    let mut sim = Simulation::reference().unwrap();
    let mut store = GameStore::default();
    sim.step(&mut store, forward(), DT);
    let snap = sim.snapshot(&store);
    assert_eq!(snap.tick, 1);
    assert_eq!(snap.position[2], sim.body().position.z);
    assert_relative_eq!(snap.speed, sim.body().speed());
    assert!(!snap.paused);
}
