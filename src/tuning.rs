//! Data-driven game balance
//!
//! Every number that shapes the difficulty curve lives here so a run can be
//! re-tuned from a JSON file without touching the simulation. Missing fields
//! fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::BallType;

/// Score tiers shared by the multi-spawn and flying tables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBreakpoints {
    pub bp1: u64,
    pub bp2: u64,
    pub bp3: u64,
    pub bp4: u64,
    pub bp5: u64,
}

impl Default for ScoreBreakpoints {
    fn default() -> Self {
        Self {
            bp1: 1000,
            bp2: 2000,
            bp3: 3000,
            bp4: 5000,
            bp5: 10000,
        }
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Speed ===
    /// Scroll speed at the start of a run (px per 60 Hz frame)
    pub base_speed: f32,
    /// Seconds between speed steps
    pub speed_step_interval: f32,
    /// Speed added per step
    pub speed_step: f32,
    /// Score at which the hard multiplier kicks in
    pub difficulty_threshold: u64,
    pub hard_speed_multiplier: f32,

    // === Ground obstacles ===
    pub obstacle_interval_min_easy: f32,
    pub obstacle_interval_min_hard: f32,
    pub obstacle_interval_max: f32,
    /// Max interval shrinks by `game_time / period`, up to `shrink_max`
    pub obstacle_interval_shrink_period: f32,
    pub obstacle_interval_shrink_max: f32,
    /// Horizontal distance (px) that must scroll by between ground spawns
    pub obstacle_min_distance: f32,
    /// Extra distance per unit of speed
    pub obstacle_distance_per_speed: f32,
    pub breakpoints: ScoreBreakpoints,
    /// Multi-spawn chance per tier: base, bp1..bp5
    pub multi_chance: [f32; 6],
    /// Max multi-spawn count: base, bp1, bp4
    pub multi_max_count: [u32; 3],
    pub dark_cone_unlock: u64,
    pub dark_cone_max_chance: f32,
    /// Rivals switch to the taller team above this score
    pub rival_upgrade_score: u64,

    // === Flying obstacles ===
    pub flying_chance_base: f32,
    pub flying_chance_max: f32,
    pub flying_interval_min: f32,
    pub flying_interval_max: f32,
    pub drone_unlock: u64,
    /// Share of flying spawns that are drones once unlocked
    pub drone_share: f32,

    // === Balls ===
    pub ball_spawn_interval: f32,
    pub starting_ball: BallType,

    // === Scoring ===
    pub ball_grab_points: u64,
    pub trick_points: u64,
    pub obstacle_hit_points: u64,
    pub goal_points: u64,
    pub milestone_interval: u64,
    /// Points accrued per simulated second while running
    pub passive_points_per_second: f32,

    // === Messages (seconds on screen) ===
    pub high_score_message_duration: f32,
    pub yellow_card_message_duration: f32,
    pub red_card_message_duration: f32,
    pub goal_message_duration: f32,
    pub milestone_message_duration: f32,

    // === Night sky (read by renderers) ===
    pub night_start_score: u64,
    pub night_end_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 3.0,
            speed_step_interval: 15.0,
            speed_step: 0.3,
            difficulty_threshold: 5000,
            hard_speed_multiplier: 1.5,

            obstacle_interval_min_easy: 1.0,
            obstacle_interval_min_hard: 1.0,
            obstacle_interval_max: 2.5,
            obstacle_interval_shrink_period: 100.0,
            obstacle_interval_shrink_max: 1.0,
            obstacle_min_distance: 200.0,
            obstacle_distance_per_speed: 20.0,
            breakpoints: ScoreBreakpoints::default(),
            multi_chance: [0.1, 0.2, 0.3, 0.45, 0.6, 0.8],
            multi_max_count: [2, 3, 4],
            dark_cone_unlock: 2000,
            dark_cone_max_chance: 0.6,
            rival_upgrade_score: 2000,

            flying_chance_base: 0.3,
            flying_chance_max: 0.6,
            flying_interval_min: 2.0,
            flying_interval_max: 3.5,
            drone_unlock: 1000,
            drone_share: 0.4,

            ball_spawn_interval: 5.0,
            starting_ball: BallType::Classic,

            ball_grab_points: 5,
            trick_points: 5,
            obstacle_hit_points: 10,
            goal_points: 100,
            milestone_interval: 1000,
            passive_points_per_second: 30.0,

            high_score_message_duration: 3.0,
            yellow_card_message_duration: 2.0,
            red_card_message_duration: 3.0,
            goal_message_duration: 2.0,
            milestone_message_duration: 2.0,

            night_start_score: 5000,
            night_end_score: 10000,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning JSON ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Load tuning from a JSON file, falling back to defaults if unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded tuning from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read tuning {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }
}
