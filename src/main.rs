//! Goleador headless runner
//!
//! Plays one autopilot session at 60 Hz against the real simulation, logging
//! banners and sounds, then prints the final score.
//!
//! Native usage: `goleador [tuning.json] [seed]`

use goleador::audio::{self, LogAudio};
use goleador::persistence::ScoreStore;
use goleador::platform::{Autopilot, EdgeDetector, InputSource};
use goleador::renderer::{BannerLog, FrameView, Renderer};
use goleador::sim::{GameEvent, GamePhase};
use goleador::{Session, Tuning};

/// Simulated frame time (seconds)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this many frames (five minutes)
const MAX_FRAMES: u32 = 60 * 60 * 5;

/// Run until the first game-over screen; returns the final score
fn play<S: ScoreStore>(session: &mut Session<S>) -> u64 {
    let mut pilot = Autopilot::default();
    let mut edges = EdgeDetector::default();
    let mut renderer = BannerLog::default();
    let mut sound = LogAudio::default();

    for _ in 0..MAX_FRAMES {
        let keys = pilot.poll(&session.state);
        let input = edges.update(keys);
        let events = session.step(&input, FRAME_DT);

        for event in &events {
            match event {
                GameEvent::Card { color } => log::info!("{color:?} card"),
                GameEvent::Goal { points } => log::info!("Goal! +{points}"),
                _ => log::debug!("{event:?}"),
            }
        }
        audio::dispatch(&mut sound, &events);
        renderer.draw(&FrameView::of(&session.state));

        if session.state.phase == GamePhase::Over {
            break;
        }
    }

    if let Some(screen) = FrameView::of(&session.state).game_over {
        log::info!("{} - {}", screen.title, screen.message);
    }
    log::info!(
        "{} frames drawn, {} sounds played",
        renderer.frames,
        sound.played
    );
    session.state.progress.score
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use goleador::persistence::FileStore;
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Goleador (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = args.next().map(Tuning::load).unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut session = Session::new(FileStore::new("goleador-best.json"), tuning, seed);
    let score = play(&mut session);
    println!(
        "Final score: {score} (best {})",
        session.state.progress.best.persisted
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use goleador::persistence::LocalStorageStore;

    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Goleador (wasm) starting...");

    let mut seed = [0u8; 8];
    if getrandom_03::fill(&mut seed).is_err() {
        log::warn!("No entropy source, using a fixed seed");
    }
    let mut session = Session::new(LocalStorageStore, Tuning::default(), u64::from_le_bytes(seed));
    let score = play(&mut session);
    log::info!("Final score: {score}");
}
