//! One driving session: simulation, store and held keys, advanced a frame at a time

use std::ops::ControlFlow;
use std::time::Instant;

use drive_common::Real;
use drive_physics::{ControlPatch, GameStore, Simulation, StepReport};
use log::{debug, info};

use crate::client::FrameSink;
use crate::config::TUNE_STEP;
use crate::error::ClientError;
use crate::hud::{advance_wheel, render_hud, render_map, HudView, MAP_HEIGHT, MAP_WIDTH};
use crate::keyboard::{HeldKeyTracker, HostCommand, InputEvent};

pub struct DriveSession {
    sim: Simulation,
    store: GameStore,
    tracker: HeldKeyTracker,
    wheel_angle: Real,
}

impl DriveSession {
    pub fn new(sim: Simulation, store: GameStore, tracker: HeldKeyTracker) -> Self {
        Self { sim, store, tracker, wheel_angle: 0.0 }
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    /// Handle one input event; `Break` means the player asked to quit
    pub fn apply(&mut self, event: InputEvent, now: Instant) -> Result<ControlFlow<()>, ClientError> {
        match event {
            InputEvent::Command(HostCommand::Quit) => {
                info!("Quit requested at tick {}", self.sim.tick());
                return Ok(ControlFlow::Break(()));
            }
            InputEvent::Command(HostCommand::TogglePause) => {
                self.store.toggle_pause();
            }
            InputEvent::Command(HostCommand::Reset) => {
                self.sim.reset(&mut self.store)?;
                self.tracker.clear();
                self.wheel_angle = 0.0;
            }
            InputEvent::Command(HostCommand::Faster) => self.scale_acceleration(1.0 + TUNE_STEP),
            InputEvent::Command(HostCommand::Slower) => self.scale_acceleration(1.0 - TUNE_STEP),
            key => self.tracker.handle(key, now),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn scale_acceleration(&mut self, factor: Real) {
        let patch = ControlPatch {
            acceleration: Some(self.store.controls().acceleration * factor),
            ..Default::default()
        };
        // rejected updates are logged by the store and leave controls unchanged
        if let Err(e) = self.store.update_controls(&patch) {
            debug!("Acceleration unchanged: {}", e);
        }
    }

    /// Step the simulation by `dt` and draw the result
    pub fn frame<S: FrameSink>(&mut self, sink: &mut S, dt: Real, now: Instant) -> Result<StepReport, ClientError> {
        let keys = self.tracker.held(now);
        let report = self.sim.step(&mut self.store, keys, dt);
        self.wheel_angle = advance_wheel(self.wheel_angle, report.wheel_spin);

        let snapshot = self.sim.snapshot(&self.store);
        let view = HudView {
            snapshot: &snapshot,
            controls: self.store.controls(),
            keys,
            wheel_angle: self.wheel_angle,
            contacts: self.sim.contacts().total(),
        };
        let mut lines = render_hud(&view);
        lines.push(String::new());
        lines.extend(render_map(
            &snapshot,
            self.sim.obstacles(),
            self.sim.boundary().half_extent,
            MAP_WIDTH,
            MAP_HEIGHT,
        ));
        sink.draw(&lines)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use drive_common::LogicalKey;
    use drive_physics::ControlConfig;
    use std::io;
    use std::time::Duration;

    const DT: Real = 1.0 / 60.0;

    /// Records frames instead of drawing them
    #[derive(Default)]
    struct FakeSink {
        frames: Vec<Vec<String>>,
    }

    impl FrameSink for FakeSink {
        fn draw(&mut self, lines: &[String]) -> io::Result<()> {
            self.frames.push(lines.to_vec());
            Ok(())
        }
    }

    struct BrokenSink;

    impl FrameSink for BrokenSink {
        fn draw(&mut self, _lines: &[String]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    fn session() -> DriveSession {
        let tracker = HeldKeyTracker::new(Duration::from_millis(150), true);
        DriveSession::new(Simulation::reference().unwrap(), GameStore::default(), tracker)
    }

    #[test]
    fn quit_breaks() {
        let mut s = session();
        let flow = s.apply(InputEvent::Command(HostCommand::Quit), Instant::now()).unwrap();
        assert!(flow.is_break());
    }

    #[test]
    fn held_forward_moves_car_and_draws_frames() {
        let mut s = session();
        let mut sink = FakeSink::default();
        let now = Instant::now();
        s.apply(InputEvent::Press(LogicalKey::Forward), now).unwrap();
        for _ in 0..30 {
            s.frame(&mut sink, DT, now).unwrap();
        }
        assert!(s.sim().body().position.z < 0.0);
        assert_relative_eq!(s.store().speed(), s.sim().body().speed());
        assert!(s.wheel_angle > 0.0);
        assert_eq!(sink.frames.len(), 30);
        let last = sink.frames.last().unwrap();
        assert!(last.iter().any(|l| l.starts_with("Speed")));
        assert!(last.iter().any(|l| l.contains('T')));
    }

    #[test]
    fn pause_then_reset() {
        let mut s = session();
        let mut sink = FakeSink::default();
        let now = Instant::now();
        s.apply(InputEvent::Press(LogicalKey::Forward), now).unwrap();
        s.frame(&mut sink, DT, now).unwrap();

        s.apply(InputEvent::Command(HostCommand::TogglePause), now).unwrap();
        let report = s.frame(&mut sink, DT, now).unwrap();
        assert!(!report.ran_physics);
        assert!(sink.frames.last().unwrap()[0].contains("PAUSED"));

        s.apply(InputEvent::Command(HostCommand::Reset), now).unwrap();
        assert!(!s.store().paused());
        assert_eq!(s.wheel_angle, 0.0);
        let report = s.frame(&mut sink, DT, now).unwrap();
        // forward was cleared by the reset
        assert_eq!(report.speed, 0.0);
    }

    #[test]
    fn plus_and_minus_scale_acceleration() {
        let mut s = session();
        let base = ControlConfig::default().acceleration;
        s.apply(InputEvent::Command(HostCommand::Faster), Instant::now()).unwrap();
        assert_relative_eq!(s.store().controls().acceleration, base * 1.1, epsilon = 1e-3);
        s.apply(InputEvent::Command(HostCommand::Slower), Instant::now()).unwrap();
        assert_relative_eq!(s.store().controls().acceleration, base * 1.1 * 0.9, epsilon = 1e-3);
    }

    #[test]
    fn draw_failure_is_reported() {
        let mut s = session();
        assert!(matches!(s.frame(&mut BrokenSink, DT, Instant::now()), Err(ClientError::Io(_))));
    }
}
