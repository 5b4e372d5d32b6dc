/**
 * Drive - Terminal Host Entry Point
 *
 * Reads settings from the environment, builds the world and simulation,
 * then runs the frame loop with keyboard input arriving from a reader thread.
 */
mod client;
mod config;
mod error;
mod game;
mod hud;
mod keyboard;

use std::fs::OpenOptions;
use std::ops::ControlFlow;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Instant;

use crossbeam::channel::bounded;
use drive_physics::prelude::*;
use log::{info, warn};
use tracing_subscriber::filter::LevelFilter;

use crate::client::TerminalSession;
use crate::config::{ClientSettings, ENV_LOG_LEVEL, KEY_CHANNEL_CAPACITY};
use crate::error::ClientError;
use crate::game::DriveSession;
use crate::keyboard::HeldKeyTracker;

/// Log to a file; the terminal belongs to the HUD while raw mode is on
fn init_logging(settings: &ClientSettings) -> Result<(), ClientError> {
    let level = LevelFilter::from_str(&settings.log_level).map_err(|_| ClientError::InvalidEnv {
        name: ENV_LOG_LEVEL,
        value: settings.log_level.clone(),
    })?;
    let file = OpenOptions::new().create(true).append(true).open(&settings.log_file)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| ClientError::Logging(e.to_string()))
}

fn build_simulation(settings: &ClientSettings) -> Result<(Simulation, GameStore), ClientError> {
    let world = settings.build_world()?;

    let mut store = GameStore::default();
    let patch = settings.load_controls_patch()?;
    if !patch.is_empty() {
        store.update_controls(&patch)?;
    }

    let sim = Simulation::new(BodyConfig::default(), CameraConfig::default(), world)?;
    Ok((sim, store))
}

fn run() -> Result<(), ClientError> {
    let settings = ClientSettings::from_env()?;
    init_logging(&settings)?;
    info!("Starting with {:?}", settings);

    let frame_loop = FrameLoop::from_hz(settings.tick_hz)?;
    let (sim, store) = build_simulation(&settings)?;

    let mut terminal = TerminalSession::enter()?;
    let tracker = HeldKeyTracker::new(settings.hold, terminal.release_events());
    let mut session = DriveSession::new(sim, store, tracker);

    let cancel = CancelToken::new();
    let (sender, receiver) = bounded(KEY_CHANNEL_CAPACITY);
    let reader = client::spawn_input_reader(sender, cancel.clone())?;

    let mut failure = None;
    let frames = frame_loop.run(&cancel, |dt| {
        let now = Instant::now();
        for event in receiver.try_iter() {
            match session.apply(event, now) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => return ControlFlow::Break(()),
                Err(e) => {
                    failure = Some(e);
                    return ControlFlow::Break(());
                }
            }
        }
        match session.frame(&mut terminal, dt, now) {
            Ok(_) => ControlFlow::Continue(()),
            Err(e) => {
                failure = Some(e);
                ControlFlow::Break(())
            }
        }
    });

    cancel.cancel();
    drop(receiver);
    if reader.join().is_err() {
        warn!("Input reader panicked");
    }
    drop(terminal);
    info!(
        "Exited after {} frames at tick {}, last speed {:.1}",
        frames,
        session.sim().tick(),
        session.store().speed()
    );

    failure.map_or(Ok(()), Err)
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("drive: {}", e);
            ExitCode::FAILURE
        }
    }
}
