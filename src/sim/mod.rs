//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (store order is spawn order)
//! - No rendering, audio or platform dependencies; side effects leave as
//!   `GameEvent`s drained after each step

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod effects;
pub mod entities;
pub mod events;
pub mod messages;
pub mod player;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::Clock;
pub use collision::Aabb;
pub use difficulty::Difficulty;
pub use entities::{
    Appearance, Ball, BallType, HairStyle, Obstacle, ObstacleKind, ObstacleTag, Particle,
    ParticleKind, ShotBall, Team,
};
pub use events::{CardColor, GameEvent};
pub use messages::{Banner, Channel, MessageArbiter};
pub use player::{MAX_HELD_BALLS, Player, ShootOutcome};
pub use progression::Progression;
pub use spawn::{GroundCategory, SpawnScheduler};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
