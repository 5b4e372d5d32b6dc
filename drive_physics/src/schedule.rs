//! Fixed-rate frame loop driven by a crossbeam ticker, with cooperative cancellation

use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossbeam::channel::{bounded, select, tick, Receiver, Sender, TryRecvError};
use drive_common::Real;
use log::{debug, info};

use crate::config::ConfigError;

pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Cloneable stop signal; cancelling drops the only sender so every
/// receiver observes a disconnect
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<Mutex<Option<Sender<()>>>>,
    receiver: Receiver<()>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, receiver) = bounded(0);
        Self {
            sender: Arc::new(Mutex::new(Some(sender))),
            receiver,
        }
    }

    /// Idempotent; callable from any thread
    pub fn cancel(&self) {
        let mut guard = self.sender.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.take().is_some() {
            debug!("Cancel token fired");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }

    fn receiver(&self) -> &Receiver<()> {
        &self.receiver
    }
}

/// Calls a frame closure once per interval on the current thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLoop {
    interval: Duration,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self { interval: DEFAULT_FRAME_INTERVAL }
    }
}

impl FrameLoop {
    pub fn new(interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroFrameInterval);
        }
        Ok(Self { interval })
    }

    pub fn from_hz(hz: Real) -> Result<Self, ConfigError> {
        if !(hz.is_finite() && hz > 0.0) {
            return Err(ConfigError::InvalidTickRate(hz));
        }
        let interval = Duration::try_from_secs_f64(1.0 / f64::from(hz)).map_err(|_| ConfigError::InvalidTickRate(hz))?;
        Self::new(interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run until `cancel` fires or `frame` breaks; returns the number of frames run.
    ///
    /// `frame` receives the measured seconds since the previous frame, which
    /// may drift from the nominal interval under load.
    pub fn run<F>(&self, cancel: &CancelToken, mut frame: F) -> u64
    where
        F: FnMut(Real) -> ControlFlow<()>,
    {
        let ticker = tick(self.interval);
        let mut last = Instant::now();
        let mut frames = 0u64;
        info!("Frame loop started at {:?} per frame", self.interval);

        loop {
            if cancel.is_cancelled() {
                break;
            }
            select! {
                recv(ticker) -> at => {
                    let now = at.unwrap_or_else(|_| Instant::now());
                    let dt = now.saturating_duration_since(last).as_secs_f32();
                    last = now;
                    if cancel.is_cancelled() {
                        break;
                    }
                    frames += 1;
                    if frame(dt).is_break() {
                        break;
                    }
                }
                recv(cancel.receiver()) -> _ => break,
            }
        }

        info!("Frame loop stopped after {} frames", frames);
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn token_clones_share_cancellation() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!token.is_cancelled());
        other.cancel();
        assert!(token.is_cancelled());
        other.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn rejects_non_positive_rates() {
        assert_eq!(FrameLoop::from_hz(0.0), Err(ConfigError::InvalidTickRate(0.0)));
        assert!(FrameLoop::from_hz(Real::NAN).is_err());
        assert_eq!(FrameLoop::new(Duration::ZERO), Err(ConfigError::ZeroFrameInterval));
        assert!(FrameLoop::from_hz(120.0).is_ok());
    }

    #[test]
    fn break_stops_the_loop() {
        let frame_loop = FrameLoop::new(Duration::from_millis(1)).unwrap();
        let token = CancelToken::new();
        let mut seen = Vec::new();
        let frames = frame_loop.run(&token, |dt| {
            seen.push(dt);
            if seen.len() == 3 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        });
        assert_eq!(frames, 3);
        assert!(seen.iter().all(|dt| *dt >= 0.0));
    }

    #[test]
    fn cancelled_token_runs_no_frames() {
        let token = CancelToken::new();
        token.cancel();
        let frames = FrameLoop::default().run(&token, |_| ControlFlow::Continue(()));
        assert_eq!(frames, 0);
    }

    #[test]
    fn cancel_from_another_thread() {
        let frame_loop = FrameLoop::new(Duration::from_millis(1)).unwrap();
        let token = CancelToken::new();
        let remote = token.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });
        frame_loop.run(&token, |_| ControlFlow::Continue(()));
        handle.join().unwrap();
        assert!(token.is_cancelled());
    }
}
