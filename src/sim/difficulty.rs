//! Difficulty model
//!
//! Pure functions of score and elapsed time. Nothing here accumulates: the
//! snapshot is rebuilt every tick, so recomputing it is always idempotent.

use serde::{Deserialize, Serialize};

use super::entities::Team;
use crate::tuning::Tuning;

/// Scroll speed (px per 60 Hz frame)
///
/// A step function of elapsed time, scaled by the hard multiplier once the
/// score reaches the difficulty threshold.
pub fn speed(tuning: &Tuning, score: u64, game_time: f32) -> f32 {
    let steps = if tuning.speed_step_interval > 0.0 {
        (game_time.max(0.0) / tuning.speed_step_interval).floor()
    } else {
        0.0
    };
    let base = tuning.base_speed + steps * tuning.speed_step;
    base * speed_multiplier(tuning, score)
}

pub fn speed_multiplier(tuning: &Tuning, score: u64) -> f32 {
    if score >= tuning.difficulty_threshold {
        tuning.hard_speed_multiplier
    } else {
        1.0
    }
}

pub fn min_obstacle_interval(tuning: &Tuning, score: u64) -> f32 {
    if score >= tuning.difficulty_threshold {
        tuning.obstacle_interval_min_hard
    } else {
        tuning.obstacle_interval_min_easy
    }
}

/// Upper spawn interval, shrinking slightly as the run goes on
pub fn max_obstacle_interval(tuning: &Tuning, score: u64, game_time: f32) -> f32 {
    let shrink = if tuning.obstacle_interval_shrink_period > 0.0 {
        (game_time.max(0.0) / tuning.obstacle_interval_shrink_period)
            .min(tuning.obstacle_interval_shrink_max)
    } else {
        0.0
    };
    (tuning.obstacle_interval_max - shrink).max(min_obstacle_interval(tuning, score))
}

pub fn min_obstacle_distance(tuning: &Tuning, speed: f32) -> f32 {
    tuning.obstacle_min_distance + speed * tuning.obstacle_distance_per_speed
}

/// Chance multiplier for clustered spawns, tiered by score
pub fn multi_chance(tuning: &Tuning, score: u64) -> f32 {
    let bp = &tuning.breakpoints;
    let tier = if score >= bp.bp5 {
        5
    } else if score >= bp.bp4 {
        4
    } else if score >= bp.bp3 {
        3
    } else if score >= bp.bp2 {
        2
    } else if score >= bp.bp1 {
        1
    } else {
        0
    };
    tuning.multi_chance[tier]
}

pub fn max_multi_count(tuning: &Tuning, score: u64) -> u32 {
    let bp = &tuning.breakpoints;
    let count = if score >= bp.bp4 {
        tuning.multi_max_count[2]
    } else if score >= bp.bp1 {
        tuning.multi_max_count[1]
    } else {
        tuning.multi_max_count[0]
    };
    count.max(2)
}

/// Flying spawn chance, linear from base to max over the top breakpoint
pub fn flying_chance(tuning: &Tuning, score: u64) -> f32 {
    let top = tuning.breakpoints.bp5.max(1) as f32;
    let progress = (score as f32 / top).min(1.0);
    tuning.flying_chance_base + progress * (tuning.flying_chance_max - tuning.flying_chance_base)
}

pub fn drones_unlocked(tuning: &Tuning, score: u64) -> bool {
    score >= tuning.drone_unlock
}

/// Dark cone chance: zero before the unlock, linear to the max at the top breakpoint
pub fn dark_cone_chance(tuning: &Tuning, score: u64) -> f32 {
    if score < tuning.dark_cone_unlock {
        return 0.0;
    }
    let span = tuning.breakpoints.bp5.saturating_sub(tuning.dark_cone_unlock).max(1) as f32;
    let progress = ((score - tuning.dark_cone_unlock) as f32 / span).min(1.0);
    progress * tuning.dark_cone_max_chance
}

pub fn rival_team(tuning: &Tuning, score: u64) -> Team {
    if score > tuning.rival_upgrade_score {
        Team::Brazil
    } else {
        Team::France
    }
}

pub fn is_night(tuning: &Tuning, score: u64) -> bool {
    score >= tuning.night_start_score && score < tuning.night_end_score
}

/// Per-tick snapshot of every score/time derived parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub speed: f32,
    pub min_obstacle_interval: f32,
    pub max_obstacle_interval: f32,
    pub min_obstacle_distance: f32,
    pub multi_chance: f32,
    pub max_multi_count: u32,
    pub flying_chance: f32,
    pub drones_unlocked: bool,
    pub dark_cone_chance: f32,
    pub rival_team: Team,
    pub night: bool,
}

impl Difficulty {
    pub fn at(tuning: &Tuning, score: u64, game_time: f32) -> Self {
        let speed = speed(tuning, score, game_time);
        Self {
            speed,
            min_obstacle_interval: min_obstacle_interval(tuning, score),
            max_obstacle_interval: max_obstacle_interval(tuning, score, game_time),
            min_obstacle_distance: min_obstacle_distance(tuning, speed),
            multi_chance: multi_chance(tuning, score),
            max_multi_count: max_multi_count(tuning, score),
            flying_chance: flying_chance(tuning, score),
            drones_unlocked: drones_unlocked(tuning, score),
            dark_cone_chance: dark_cone_chance(tuning, score),
            rival_team: rival_team(tuning, score),
            night: is_night(tuning, score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base_speed_at_start() {
        let tuning = Tuning::default();
        assert_eq!(speed(&tuning, 0, 0.0), 3.0);
        assert!((speed(&tuning, 0, 15.0) - 3.3).abs() < 1e-5);
        assert!((speed(&tuning, 0, 29.9) - 3.3).abs() < 1e-5);
    }

    #[test]
    fn test_hard_multiplier_at_threshold() {
        let tuning = Tuning::default();
        let below = speed(&tuning, 4999, 45.0);
        let at = speed(&tuning, 5000, 45.0);
        assert!((at - below * 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_tiers() {
        let tuning = Tuning::default();
        assert_eq!(multi_chance(&tuning, 0), 0.1);
        assert_eq!(multi_chance(&tuning, 1000), 0.2);
        assert_eq!(multi_chance(&tuning, 2999), 0.3);
        assert_eq!(multi_chance(&tuning, 10000), 0.8);
        assert_eq!(max_multi_count(&tuning, 999), 2);
        assert_eq!(max_multi_count(&tuning, 1000), 3);
        assert_eq!(max_multi_count(&tuning, 5000), 4);
    }

    #[test]
    fn test_flying_and_cone_curves() {
        let tuning = Tuning::default();
        assert!((flying_chance(&tuning, 0) - 0.3).abs() < 1e-6);
        assert!((flying_chance(&tuning, 5000) - 0.45).abs() < 1e-6);
        assert!((flying_chance(&tuning, 50_000) - 0.6).abs() < 1e-6);
        assert!(!drones_unlocked(&tuning, 999));
        assert!(drones_unlocked(&tuning, 1000));
        assert_eq!(dark_cone_chance(&tuning, 1999), 0.0);
        assert!((dark_cone_chance(&tuning, 6000) - 0.3).abs() < 1e-6);
        assert!((dark_cone_chance(&tuning, 20_000) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_interval_bounds() {
        let tuning = Tuning::default();
        assert_eq!(max_obstacle_interval(&tuning, 0, 0.0), 2.5);
        assert!((max_obstacle_interval(&tuning, 0, 50.0) - 2.0).abs() < 1e-6);
        assert_eq!(max_obstacle_interval(&tuning, 0, 1000.0), 1.5);
        assert_eq!(min_obstacle_distance(&tuning, 3.0), 260.0);
    }

    #[test]
    fn test_rival_team_and_night() {
        let tuning = Tuning::default();
        assert_eq!(rival_team(&tuning, 2000), Team::France);
        assert_eq!(rival_team(&tuning, 2001), Team::Brazil);
        assert!(!is_night(&tuning, 4999));
        assert!(is_night(&tuning, 5000));
        assert!(!is_night(&tuning, 10000));
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let tuning = Tuning::default();
        assert_eq!(Difficulty::at(&tuning, 3210, 42.0), Difficulty::at(&tuning, 3210, 42.0));
    }

    proptest! {
        #[test]
        fn speed_non_decreasing_in_score(a in 0u64..20_000, b in 0u64..20_000, t in 0.0f32..600.0) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(speed(&tuning, lo, t) <= speed(&tuning, hi, t));
        }

        #[test]
        fn speed_non_decreasing_in_time(
            s in 0u64..20_000,
            t1 in 0.0f32..600.0,
            t2 in 0.0f32..600.0,
        ) {
            let tuning = Tuning::default();
            let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            prop_assert!(speed(&tuning, s, lo) <= speed(&tuning, s, hi));
        }

        #[test]
        fn max_interval_never_below_min(s in 0u64..20_000, t in 0.0f32..10_000.0) {
            let tuning = Tuning::default();
            prop_assert!(max_obstacle_interval(&tuning, s, t) >= min_obstacle_interval(&tuning, s));
        }
    }
}
