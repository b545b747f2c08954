//! Events emitted by the simulation step
//!
//! The step appends to `GameState::events`; audio and render collaborators
//! drain the list after the step completes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{BallType, ObstacleTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardColor {
    Yellow,
    Red,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First directional input on the start screen
    Started,
    BallCollected { ball_type: BallType },
    /// Kick animation started (with or without a ball)
    Kick,
    Shot { ball_type: BallType },
    Slide,
    Trick { index: u32 },
    TrickLanded { points: u64 },
    /// Obstacle destroyed or knocked down, by a shot ball or a slide
    ObstacleHit {
        obstacle: ObstacleTag,
        pos: Vec2,
        points: u64,
        by_slide: bool,
    },
    Card { color: CardColor },
    Goal { points: u64 },
    Milestone { value: u64 },
    /// Score passed the session best; `announced` if the banner was shown
    NewBest { score: u64, announced: bool },
    /// Session ended; `new_record` when the persisted best was beaten
    GameOver { score: u64, new_record: bool },
    Restarted,
}
