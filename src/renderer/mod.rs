//! Renderer sink
//!
//! Renderers never touch `GameState` directly. Each frame they get a
//! read-only `FrameView` borrowing the stores plus the derived HUD values.

use crate::consts::*;
use crate::sim::{
    Ball, Channel, GamePhase, GameState, Obstacle, Particle, Player, ShotBall,
};

/// Zero-padded width of HUD scores
const SCORE_PADDING: usize = 5;

/// End-of-run title and subtitle, chosen by score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverScreen {
    pub title: &'static str,
    pub message: &'static str,
    pub score: u64,
    /// Matched or beat the session best
    pub new_best: bool,
}

impl GameOverScreen {
    pub fn for_score(score: u64, session_best: u64) -> Self {
        let (title, message) = match score {
            5000.. => ("LEGENDARY", "HALL OF FAME"),
            3000.. => ("AMAZING", "TOP SCORER"),
            2000.. => ("GREAT JOB", "KEEP GOING"),
            1000.. => ("NICE RUN", "GETTING BETTER"),
            500.. => ("NOT BAD", "KEEP PRACTICING"),
            _ => ("GAME OVER", "TRY AGAIN"),
        };
        Self {
            title,
            message,
            score,
            new_best: score >= session_best && score > 0,
        }
    }
}

/// The banner on screen this frame
#[derive(Debug, Clone, PartialEq)]
pub struct BannerView<'a> {
    pub channel: Channel,
    pub text: &'a str,
    /// 0 when it appears, 1 when it expires
    pub progress: f32,
}

/// Everything a renderer may read for one frame
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub balls: &'a [Ball],
    pub shot_balls: &'a [ShotBall],
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub banner: Option<BannerView<'a>>,
    /// "HI 00120  00045"
    pub score_text: String,
    pub score_color: u32,
    pub night: bool,
    pub camera_shake: f32,
    /// Seconds of crowd cheering left
    pub crowd_cheer: f32,
    pub game_over: Option<GameOverScreen>,
}

impl<'a> FrameView<'a> {
    pub fn of(state: &'a GameState) -> Self {
        let progress = &state.progress;
        let banner = state.messages.visible().map(|(channel, banner)| BannerView {
            channel,
            text: &banner.text,
            progress: if banner.duration > 0.0 {
                1.0 - banner.remaining / banner.duration
            } else {
                1.0
            },
        });

        Self {
            phase: state.phase,
            player: &state.player,
            balls: &state.balls,
            shot_balls: &state.shot_balls,
            obstacles: &state.obstacles,
            particles: &state.particles,
            banner,
            score_text: format!(
                "HI {:0width$}  {:0width$}",
                progress.best.session,
                progress.score,
                width = SCORE_PADDING
            ),
            score_color: score_color(progress.new_best, progress.score_flash),
            night: state.difficulty.night,
            camera_shake: state.clock.camera_shake,
            crowd_cheer: progress.crowd_cheer,
            game_over: (state.phase == GamePhase::Over)
                .then(|| GameOverScreen::for_score(progress.score, progress.best.session)),
        }
    }
}

/// Gold after a new best, yellow while flashing, white otherwise
pub fn score_color(new_best: bool, score_flash: f32) -> u32 {
    if new_best {
        COLOR_SCORE_GOLD
    } else if score_flash > 0.0 {
        COLOR_SCORE_FLASH
    } else {
        COLOR_SCORE_NORMAL
    }
}

/// Something that draws frames
pub trait Renderer {
    fn draw(&mut self, frame: &FrameView<'_>);
}

/// Headless renderer that logs banners as they appear
#[derive(Debug, Default)]
pub struct BannerLog {
    last: Option<String>,
    pub frames: u64,
}

impl Renderer for BannerLog {
    fn draw(&mut self, frame: &FrameView<'_>) {
        self.frames += 1;
        let current = frame.banner.as_ref().map(|b| b.text);
        if current != self.last.as_deref() {
            if let Some(text) = current {
                log::info!("[{}] {text}", frame.score_text);
            }
            self.last = current.map(str::to_string);
        }
    }
}
