use drive_common::{HeldKeys, ObstacleId, Real};
use log::debug;

use crate::constants::{MAX_FRAME_DT, WHEEL_SPIN_RATE};
use crate::input::apply_input;
use crate::physics::boundary::{self, BoundaryHits};
use crate::physics::collision::resolve_obstacle;
use crate::physics::{ContactRecord, Simulation};
use crate::store::GameStore;

/// What happened during one call to `Simulation::step`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepReport {
    pub tick: u64,
    /// False when paused or when `dt` was unusable
    pub ran_physics: bool,
    /// Time actually integrated, after clamping (0 when physics was skipped)
    pub dt: Real,
    pub speed: Real,
    pub speed_capped: bool,
    /// Obstacles hit this tick, in resolution order
    pub collisions: Vec<ObstacleId>,
    pub boundary: BoundaryHits,
    /// Wheel rotation to add this frame (`speed * rate * dt`)
    pub wheel_spin: Real,
}

/// Usable integration step for a raw frame time, or `None` to skip physics.
///
/// Non-finite and non-positive values are rejected; long frames (such as the
/// first frame after a suspended host resumes) are capped at `MAX_FRAME_DT`.
pub fn sanitize_dt(raw: Real) -> Option<Real> {
    if raw.is_finite() && raw > 0.0 {
        Some(raw.min(MAX_FRAME_DT))
    } else {
        None
    }
}

impl Simulation {
    /// Run one tick: input, integration, speed cap, obstacles, boundary, camera.
    pub fn step(&mut self, store: &mut GameStore, keys: HeldKeys, raw_dt: Real) -> StepReport {
        self.tick += 1;
        let mut report = StepReport { tick: self.tick, ..Default::default() };

        match sanitize_dt(raw_dt) {
            Some(dt) if !store.paused() => {
                let controls = *store.controls();
                apply_input(&mut self.body, keys, &controls, dt);
                self.body.integrate(dt);
                report.speed_capped = self.body.clamp_speed(controls.max_speed);

                // sequential: each obstacle sees the state left by the previous one
                for obstacle in self.world.obstacles.iter() {
                    let impact_speed = self.body.speed();
                    let r = resolve_obstacle(self.body.position, self.body.velocity, obstacle.center, obstacle.radius);
                    if r.collided {
                        self.body.position = r.position;
                        self.body.velocity = r.velocity;
                        self.contacts.record(ContactRecord { tick: self.tick, obstacle: obstacle.id, impact_speed });
                        report.collisions.push(obstacle.id);
                        debug!("Tick {}: hit {} at speed {:.2}", self.tick, obstacle.id, impact_speed);
                    }
                }

                report.boundary = boundary::contain(&mut self.body.position, &mut self.body.velocity, &self.world.boundary);
                if report.boundary.any() {
                    debug!("Tick {}: boundary contact {:?}", self.tick, report.boundary);
                }

                report.ran_physics = true;
                report.dt = dt;
            }
            Some(_) => {}
            None => debug!("Tick {}: skipping physics for dt {}", self.tick, raw_dt),
        }

        self.camera.update(&self.body.position, self.body.heading);

        let speed = self.body.speed();
        store.set_speed(speed);
        report.speed = speed;
        report.wheel_spin = speed * WHEEL_SPIN_RATE * report.dt;
        report
    }
}
