//! Spawn scheduling for balls and obstacles
//!
//! Three independent cadences: free balls on a fixed timer, ground obstacles
//! gated by both a randomized interval and distance travelled, and flying
//! obstacles on their own randomized timer with a score-driven chance.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::entities::{Appearance, Ball, BallType, HairStyle, Obstacle};
use super::state::GameState;
use crate::consts::*;
use crate::tuning::Tuning;

/// Ground obstacle categories, in weighting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroundCategory {
    MultiRival,
    MultiCone,
    Cone,
    Rival,
    Goal,
    Bench,
}

impl GroundCategory {
    pub const ALL: [GroundCategory; 6] = [
        GroundCategory::MultiRival,
        GroundCategory::MultiCone,
        GroundCategory::Cone,
        GroundCategory::Rival,
        GroundCategory::Goal,
        GroundCategory::Bench,
    ];

    fn base_weight(self, multi_chance: f32) -> f32 {
        match self {
            GroundCategory::MultiRival | GroundCategory::MultiCone => 0.25 * multi_chance,
            GroundCategory::Cone | GroundCategory::Rival => 0.2,
            GroundCategory::Goal | GroundCategory::Bench => 0.1,
        }
    }
}

/// Candidate categories with weights, skipping the one picked last time
pub fn category_weights(
    last: Option<GroundCategory>,
    multi_chance: f32,
) -> Vec<(GroundCategory, f32)> {
    GroundCategory::ALL
        .into_iter()
        .filter(|c| Some(*c) != last)
        .map(|c| (c, c.base_weight(multi_chance)))
        .collect()
}

/// Weighted pick for a uniform `roll` in [0, 1).
///
/// Walks the list subtracting weights and stops at the first category that
/// takes the remainder to zero or below. Rounding leftovers fall through to
/// the last entry.
pub fn pick_category(weights: &[(GroundCategory, f32)], roll: f32) -> Option<GroundCategory> {
    let total: f32 = weights.iter().map(|(_, w)| w).sum();
    let mut remaining = roll * total;
    for (category, weight) in weights {
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(*category);
        }
    }
    weights.last().map(|(c, _)| *c)
}

/// Timers and anti-repetition memory for the spawners
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub ball_timer: f32,
    pub obstacle_timer: f32,
    /// Interval rolled for the next ground spawn
    pub obstacle_interval: f32,
    /// Scroll distance since the last ground spawn (px)
    pub distance_since_obstacle: f32,
    pub flying_timer: f32,
    /// Interval rolled for the next flying attempt
    pub flying_interval: f32,
    pub last_category: Option<GroundCategory>,
}

impl SpawnScheduler {
    /// First ground obstacle arrives on the first running tick
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            ball_timer: 0.0,
            obstacle_timer: 0.0,
            obstacle_interval: 0.0,
            distance_since_obstacle: f32::MAX,
            flying_timer: 0.0,
            flying_interval: tuning.flying_interval_min,
            last_category: None,
        }
    }
}

/// Run every spawner for one tick; `scroll` is this tick's field movement
pub fn spawn_entities(state: &mut GameState, dt: f32, scroll: f32) {
    let GameState {
        tuning,
        rng,
        spawner,
        difficulty,
        balls,
        obstacles,
        ..
    } = state;

    spawner.ball_timer += dt;
    if spawner.ball_timer > tuning.ball_spawn_interval {
        spawner.ball_timer = 0.0;
        let ball_type = BallType::ALL[rng.random_range(0..BallType::ALL.len())];
        balls.push(Ball::spawn(ball_type));
    }

    spawner.obstacle_timer += dt;
    spawner.distance_since_obstacle += scroll;
    if spawner.obstacle_timer > spawner.obstacle_interval
        && spawner.distance_since_obstacle > difficulty.min_obstacle_distance
    {
        spawner.obstacle_timer = 0.0;
        spawner.distance_since_obstacle = 0.0;
        spawner.obstacle_interval = roll_interval(
            rng,
            difficulty.min_obstacle_interval,
            difficulty.max_obstacle_interval,
        );

        let weights = category_weights(spawner.last_category, difficulty.multi_chance);
        if let Some(category) = pick_category(&weights, rng.random::<f32>()) {
            spawner.last_category = Some(category);
            let before = obstacles.len();
            spawn_ground(obstacles, rng, difficulty, category);
            log::debug!(
                "Spawned {category:?} x{} at speed {:.2}",
                obstacles.len() - before,
                difficulty.speed
            );
        }
    }

    spawner.flying_timer += dt;
    if spawner.flying_timer > spawner.flying_interval {
        spawner.flying_timer = 0.0;
        spawner.flying_interval =
            roll_interval(rng, tuning.flying_interval_min, tuning.flying_interval_max);
        if rng.random::<f32>() < difficulty.flying_chance {
            obstacles.push(flying_obstacle(rng, tuning, difficulty));
        }
    }
}

fn roll_interval(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min).max(0.0)
}

fn spawn_ground(
    obstacles: &mut Vec<Obstacle>,
    rng: &mut impl Rng,
    difficulty: &Difficulty,
    category: GroundCategory,
) {
    match category {
        GroundCategory::MultiRival | GroundCategory::MultiCone => {
            let max = difficulty.max_multi_count.max(2);
            let count = rng.random_range(2..=max);
            for i in 0..count {
                let offset = i as f32;
                let obstacle = if category == GroundCategory::MultiRival {
                    rival(rng, difficulty, offset * MULTI_SPAWN_RIVAL_SPACING)
                } else {
                    cone(rng, difficulty, offset * MULTI_SPAWN_CONE_SPACING)
                };
                obstacles.push(obstacle);
            }
        }
        GroundCategory::Cone => obstacles.push(cone(rng, difficulty, 0.0)),
        GroundCategory::Rival => obstacles.push(rival(rng, difficulty, 0.0)),
        GroundCategory::Goal => obstacles.push(Obstacle::goal(SPAWN_X_RIGHT)),
        GroundCategory::Bench => {
            obstacles.push(Obstacle::bench(SPAWN_X_RIGHT, rng.random_bool(0.5)));
        }
    }
}

fn cone(rng: &mut impl Rng, difficulty: &Difficulty, offset: f32) -> Obstacle {
    let dark = rng.random::<f32>() < difficulty.dark_cone_chance;
    let alt_color = rng.random_bool(0.5);
    Obstacle::cone(SPAWN_X_RIGHT + offset, dark, alt_color)
}

fn rival(rng: &mut impl Rng, difficulty: &Difficulty, offset: f32) -> Obstacle {
    let team = difficulty.rival_team;
    let appearance = random_appearance(rng);
    let variation = rng.random_range(-RIVAL_HEIGHT_VARIATION..=RIVAL_HEIGHT_VARIATION);
    let height = team.base_height() + variation as f32;
    let run_frame = rng.random_range(0..2u8);
    Obstacle::rival(SPAWN_X_RIGHT + offset, team, height, appearance, run_frame)
}

fn random_appearance(rng: &mut impl Rng) -> Appearance {
    Appearance {
        skin_tone: SKIN_TONES[rng.random_range(0..SKIN_TONES.len())],
        hair_color: HAIR_COLORS[rng.random_range(0..HAIR_COLORS.len())],
        hair_style: HairStyle::ALL[rng.random_range(0..HairStyle::ALL.len())],
        mustache: rng.random_bool(0.4),
        beard: rng.random_bool(0.2),
    }
}

fn flying_obstacle(rng: &mut impl Rng, tuning: &Tuning, difficulty: &Difficulty) -> Obstacle {
    let share = tuning.drone_share.clamp(0.0, 1.0) as f64;
    if difficulty.drones_unlocked && rng.random_bool(share) {
        let y = GROUND_Y - 60.0 - rng.random::<f32>() * 20.0;
        Obstacle::drone(SPAWN_X_RIGHT, y)
    } else {
        let y = GROUND_Y - 120.0 - rng.random::<f32>() * 80.0;
        Obstacle::bottle(SPAWN_X_RIGHT, y)
    }
}
