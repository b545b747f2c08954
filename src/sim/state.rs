//! Game state and session transitions
//!
//! Every mutable store of a run lives in one owned `GameState`, passed
//! explicitly to the step functions. Two states never share anything.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::difficulty::Difficulty;
use super::effects;
use super::entities::{Ball, Obstacle, ObstacleTag, Particle, ShotBall};
use super::events::{CardColor, GameEvent};
use super::messages::{Channel, MessageArbiter};
use super::player::Player;
use super::progression::Progression;
use super::spawn::SpawnScheduler;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for a direction key
    NotStarted,
    /// Active gameplay
    Running,
    /// Red card shown, world frozen until the card animation ends
    CardFrozen,
    /// Slow-motion delay between the fatal moment and the game-over screen
    Ending,
    /// Game-over screen, waiting for restart
    Over,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Scaled seconds spent running this session
    pub game_time: f32,
    /// Seconds left in the ending delay
    pub phase_timer: f32,
    pub clock: Clock,
    /// Rebuilt every running tick from score and game time
    pub difficulty: Difficulty,
    pub player: Player,
    /// Free balls waiting to be grabbed
    pub balls: Vec<Ball>,
    pub shot_balls: Vec<ShotBall>,
    /// Ground and flying obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub spawner: SpawnScheduler,
    pub progress: Progression,
    pub messages: MessageArbiter,
    /// Events from the current step, drained by collaborators
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            time_ticks: 0,
            game_time: 0.0,
            phase_timer: 0.0,
            clock: Clock::default(),
            difficulty: Difficulty::at(&tuning, 0, 0.0),
            player: Player::new(tuning.starting_ball),
            balls: Vec::new(),
            shot_balls: Vec::new(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            spawner: SpawnScheduler::new(&tuning),
            progress: Progression::default(),
            messages: MessageArbiter::default(),
            events: Vec::new(),
            tuning,
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand this step's events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Leave the start screen
    pub fn start(&mut self) {
        if self.phase != GamePhase::NotStarted {
            return;
        }
        self.phase = GamePhase::Running;
        log::info!("Session started (seed {})", self.seed);
        self.emit(GameEvent::Started);
    }

    /// Reset every store and timer for a fresh run; bests and tuning survive
    pub fn restart(&mut self) {
        self.phase = GamePhase::Running;
        self.time_ticks = 0;
        self.game_time = 0.0;
        self.phase_timer = 0.0;
        self.clock = Clock::default();
        self.difficulty = Difficulty::at(&self.tuning, 0, 0.0);
        self.player = Player::new(self.tuning.starting_ball);
        self.balls.clear();
        self.shot_balls.clear();
        self.obstacles.clear();
        self.particles.clear();
        self.spawner = SpawnScheduler::new(&self.tuning);
        self.progress.reset();
        self.messages.clear_all();
        log::info!("Session restarted (session best {})", self.progress.best.session);
        self.emit(GameEvent::Restarted);
    }

    /// Field movement this tick (px)
    pub fn scroll(&self, dt: f32) -> f32 {
        self.difficulty.speed * REFERENCE_FPS * dt
    }

    /// The run is over (ending delay or game-over screen)
    pub fn session_ended(&self) -> bool {
        matches!(self.phase, GamePhase::Ending | GamePhase::Over)
    }

    /// Fatal moment: record bests and start the slow-motion ending
    pub fn end_session(&mut self) {
        if self.session_ended() {
            return;
        }
        let score = self.progress.score;
        let new_record = self.progress.best.record(score);
        self.phase = GamePhase::Ending;
        self.phase_timer = GAME_OVER_DELAY;
        self.clock.slow_motion(0.3, GAME_OVER_DELAY);
        self.clock.shake(8.0);
        let chest = self.player.chest();
        effects::explosion(&mut self.particles, &mut self.rng, chest, COLOR_PLAYER_JERSEY);
        log::info!(
            "Session over: score {score}, cards {}, new record {new_record}",
            self.player.cards
        );
        self.emit(GameEvent::GameOver { score, new_record });
    }

    /// Book a card; the second one freezes the world and ends the session
    pub fn issue_card(&mut self) {
        self.player.cards += 1;
        let color = if self.player.cards >= 2 {
            CardColor::Red
        } else {
            CardColor::Yellow
        };
        let (text, duration) = match color {
            CardColor::Yellow => ("YELLOW CARD", self.tuning.yellow_card_message_duration),
            CardColor::Red => ("RED CARD", self.tuning.red_card_message_duration),
        };
        if !self.messages.request(Channel::Card, text, duration) {
            log::debug!("{text} banner suppressed by a higher-priority message");
        }
        log::info!("{text} at score {}", self.progress.score);
        self.emit(GameEvent::Card { color });

        if color == CardColor::Red {
            self.phase = GamePhase::CardFrozen;
            self.player.card_animation.start(CARD_ANIMATION_DURATION);
        }
    }

    /// A shot ball went into the net
    pub fn score_goal(&mut self) {
        let points = self.tuning.goal_points;
        self.progress.add(points);
        self.progress.score_flash = 1.0;
        self.progress.crowd_cheer = 2.0;
        self.messages
            .request(Channel::Goal, "GOAL!", self.tuning.goal_message_duration);
        self.clock.shake(5.0);
        effects::fireworks(&mut self.particles, &mut self.rng);
        self.player.celebrate.start(CELEBRATION_DURATION);
        self.emit(GameEvent::Goal { points });
    }

    /// Explode obstacle `index`: rivals fall, everything else is removed.
    /// Returns its tag and explosion point.
    pub fn knock_out(&mut self, index: usize) -> Option<(ObstacleTag, Vec2)> {
        let obstacle = self.obstacles.get_mut(index)?;
        let tag = obstacle.tag();
        let center = obstacle.center();
        let color = obstacle.color();
        if !obstacle.knock_down() {
            self.obstacles.remove(index);
        }
        effects::explosion(&mut self.particles, &mut self.rng, center, color);
        Some((tag, center))
    }

    /// Points and feedback for taking out an obstacle
    pub fn award_hit(&mut self) -> u64 {
        let points = self.tuning.obstacle_hit_points;
        self.progress.add(points);
        self.progress.score_flash = 0.3;
        self.progress.crowd_cheer = 0.8;
        self.clock.shake(3.0);
        points
    }

    /// New-best and milestone checks after the score moved
    pub fn check_progress(&mut self) {
        if self.progress.passed_session_best() {
            let score = self.progress.score;
            let announced = self.progress.best.session > 0
                && self.messages.request(
                    Channel::HighScore,
                    "NEW HIGH SCORE!",
                    self.tuning.high_score_message_duration,
                );
            self.progress.confetti_timer = 0.0;
            self.progress.confetti_elapsed = 0.0;
            log::info!("New session best at {score}");
            self.emit(GameEvent::NewBest { score, announced });
        }

        if let Some(value) = self.progress.milestone_crossed(self.tuning.milestone_interval) {
            // Missed milestones are skipped, not queued
            if self.messages.request(
                Channel::Milestone,
                format!("{value}!"),
                self.tuning.milestone_message_duration,
            ) {
                self.emit(GameEvent::Milestone { value });
            }
        }
    }

    /// Confetti bursts for a while after a new best
    pub fn update_confetti(&mut self, dt: f32) {
        if !self.progress.new_best {
            return;
        }
        self.progress.confetti_elapsed += dt;
        if self.progress.confetti_elapsed >= CONFETTI_MAX_DURATION {
            return;
        }
        self.progress.confetti_timer += dt;
        if self.progress.confetti_timer > CONFETTI_SPAWN_INTERVAL {
            self.progress.confetti_timer = 0.0;
            effects::confetti(&mut self.particles, &mut self.rng);
        }
    }
}
