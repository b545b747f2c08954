//! Score, milestones and score-driven feedback timers

use serde::{Deserialize, Serialize};

use crate::highscores::BestScores;

/// Everything score-related that survives between ticks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progression {
    /// Never decreases within a session
    pub score: u64,
    pub best: BestScores,
    /// Highest milestone index already reached (score / interval)
    pub last_milestone: u64,
    /// Score has passed the session best this session
    pub new_best: bool,
    /// Fractional passive points carried between ticks
    passive_carry: f32,
    /// Seconds left on the score flash (goal/hit feedback)
    pub score_flash: f32,
    /// Seconds left on the crowd cheer animation
    pub crowd_cheer: f32,
    pub confetti_timer: f32,
    /// Seconds confetti has been running since the new best
    pub confetti_elapsed: f32,
}

impl Progression {
    pub fn new(best: BestScores) -> Self {
        Self {
            best,
            ..Self::default()
        }
    }

    pub fn add(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Time-based trickle of points; returns the whole points added
    pub fn accrue_passive(&mut self, dt: f32, points_per_second: f32) -> u64 {
        self.passive_carry += dt * points_per_second.max(0.0);
        let whole = self.passive_carry.floor();
        self.passive_carry -= whole;
        let points = whole as u64;
        self.add(points);
        points
    }

    /// Milestone value if the score entered a new interval since the last one.
    /// Compares interval indices, so any stride crosses exactly once.
    pub fn milestone_crossed(&mut self, interval: u64) -> Option<u64> {
        if interval == 0 {
            return None;
        }
        let index = self.score / interval;
        if index > self.last_milestone {
            self.last_milestone = index;
            Some(index * interval)
        } else {
            None
        }
    }

    /// True the first time this session the score passes the session best
    pub fn passed_session_best(&mut self) -> bool {
        if !self.new_best && self.score > self.best.session {
            self.new_best = true;
            return true;
        }
        false
    }

    pub fn tick_timers(&mut self, dt: f32) {
        self.score_flash = (self.score_flash - dt).max(0.0);
        self.crowd_cheer = (self.crowd_cheer - dt).max(0.0);
    }

    /// Back to a fresh run, keeping the bests
    pub fn reset(&mut self) {
        *self = Self::new(self.best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_fires_once_per_interval() {
        let mut progress = Progression::default();
        let mut fired = Vec::new();
        for _ in 0..100 {
            progress.add(10);
            if let Some(value) = progress.milestone_crossed(1000) {
                fired.push((progress.score, value));
            }
        }
        assert_eq!(fired, vec![(1000, 1000)]);

        progress.add(5);
        assert_eq!(progress.score, 1005);
        assert_eq!(progress.milestone_crossed(1000), None);
    }

    #[test]
    fn test_milestone_with_odd_stride() {
        // A stride that never lands on a multiple still crosses once
        let mut progress = Progression::default();
        let mut fired = Vec::new();
        for _ in 0..200 {
            progress.add(17);
            if let Some(value) = progress.milestone_crossed(1000) {
                fired.push(value);
            }
        }
        assert_eq!(fired, vec![1000, 2000, 3000]);
    }

    #[test]
    fn test_passive_points_carry_fraction() {
        let mut progress = Progression::default();
        let mut total = 0;
        for _ in 0..60 {
            total += progress.accrue_passive(1.0 / 60.0, 30.0);
        }
        assert!((29..=30).contains(&total), "got {total}");
        assert_eq!(progress.score, total);
    }

    #[test]
    fn test_new_best_only_once() {
        let mut progress = Progression::new(BestScores {
            session: 100,
            persisted: 500,
        });
        progress.add(100);
        assert!(!progress.passed_session_best());
        progress.add(1);
        assert!(progress.passed_session_best());
        progress.add(50);
        assert!(!progress.passed_session_best());
    }

    #[test]
    fn test_reset_keeps_bests() {
        let best = BestScores {
            session: 900,
            persisted: 1200,
        };
        let mut progress = Progression::new(best);
        progress.add(700);
        progress.new_best = true;
        progress.last_milestone = 3;
        progress.reset();
        assert_eq!(progress.score, 0);
        assert_eq!(progress.last_milestone, 0);
        assert!(!progress.new_best);
        assert_eq!(progress.best, best);
    }
}
