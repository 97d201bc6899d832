//! Rocks entry point
//!
//! Headless native build: the autopilot flies the ship and every frame is
//! tessellated into a vertex buffer. Usage: `rocks [settings.json]`

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use rocks::platform::{Autopilot, FrameClock};
use rocks::renderer::VertexSurface;
use rocks::sim::GameState;
use rocks::telemetry::{JsonlTelemetry, NullTelemetry, TelemetrySink};
use rocks::{Session, SessionOutcome, Settings};

/// How long the autopilot plays before quitting
const AUTOPILOT_SECONDS: u32 = 60;

fn print_welcome_message(settings: &Settings) {
    println!("Starting Rocks v{}", env!("CARGO_PKG_VERSION"));
    println!("Screen width: {}", settings.screen_width);
    println!("Screen height: {}", settings.screen_height);
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn play<T: TelemetrySink>(
    state: GameState,
    telemetry: T,
) -> Result<SessionOutcome, rocks::SimError> {
    let settings = &state.settings;
    let surface = VertexSurface::new(settings.screen_width, settings.screen_height);
    let pilot = Autopilot::new(state.seed, settings.fps * AUTOPILOT_SECONDS);
    let mut session = Session::new(state, surface, FrameClock::new(), pilot, telemetry);
    session.run()
}

fn run() -> Result<SessionOutcome, Box<dyn std::error::Error>> {
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(path.as_deref())?;

    print_welcome_message(&settings);
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Rocks starting: {}x{} at {} fps, seed {seed}",
        settings.screen_width,
        settings.screen_height,
        settings.fps
    );

    let telemetry = settings.telemetry;
    let state = GameState::new(settings, seed)?;
    let outcome = if telemetry {
        let sink = JsonlTelemetry::from_settings(&state.settings);
        play(state, sink)?
    } else {
        play(state, NullTelemetry)?
    };
    Ok(outcome)
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(outcome) => {
            log::info!("Session ended: {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("rocks: {err}");
            ExitCode::FAILURE
        }
    }
}
