//! Player state machine
//!
//! Position and velocity plus timed action flags. Exclusive actions are
//! dropped, not queued, when requested while a conflicting one is active.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::entities::{BallType, ShotBall};
use crate::consts::*;

/// Most balls the player can carry
pub const MAX_HELD_BALLS: usize = 2;

/// A countdown attached to an action flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionTimer {
    active: bool,
    remaining: f32,
}

impl ActionTimer {
    pub fn start(&mut self, duration: f32) {
        self.active = true;
        self.remaining = duration;
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.remaining = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Count down; returns true on the tick the action completes
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.cancel();
            return true;
        }
        false
    }
}

/// Result of a shoot request
#[derive(Debug, Clone, PartialEq)]
pub enum ShootOutcome {
    /// Another action is in progress
    Blocked,
    /// Kick animation only, nothing held
    Kicked,
    /// Kick animation and a ball in flight
    Fired(ShotBall),
}

/// The player-controlled runner; `pos` is the left foot on the ground line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub grounded: bool,
    /// Held balls, oldest first
    pub inventory: VecDeque<BallType>,
    pub kick: ActionTimer,
    pub slide: ActionTimer,
    pub trick: ActionTimer,
    pub celebrate: ActionTimer,
    pub card_animation: ActionTimer,
    /// Cards received this session
    pub cards: u32,
    /// Set once the current slide has drawn a card
    pub slide_gave_card: bool,
    pub trick_index: u32,
    pub run_frame: u8,
    run_timer: f32,
}

impl Player {
    /// A fresh runner holding one ball
    pub fn new(starting_ball: BallType) -> Self {
        let mut inventory = VecDeque::with_capacity(MAX_HELD_BALLS);
        inventory.push_back(starting_ball);
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_Y),
            vel: Vec2::ZERO,
            grounded: true,
            inventory,
            kick: ActionTimer::default(),
            slide: ActionTimer::default(),
            trick: ActionTimer::default(),
            celebrate: ActionTimer::default(),
            card_animation: ActionTimer::default(),
            cards: 0,
            slide_gave_card: false,
            trick_index: 0,
            run_frame: 0,
            run_timer: 0.0,
        }
    }

    pub fn is_kicking(&self) -> bool {
        self.kick.is_active()
    }

    pub fn is_sliding(&self) -> bool {
        self.slide.is_active()
    }

    pub fn is_tricking(&self) -> bool {
        self.trick.is_active()
    }

    /// Kick, slide or trick in progress
    fn is_busy(&self) -> bool {
        self.is_kicking() || self.is_sliding() || self.is_tricking()
    }

    pub fn try_jump(&mut self) -> bool {
        if !self.grounded || self.is_busy() {
            return false;
        }
        self.vel.y = JUMP_VELOCITY;
        self.grounded = false;
        true
    }

    /// Kick; fires the oldest held ball if there is one
    pub fn try_shoot(&mut self) -> ShootOutcome {
        if self.is_busy() {
            return ShootOutcome::Blocked;
        }
        self.kick.start(KICK_DURATION);
        match self.inventory.pop_front() {
            Some(ball_type) => ShootOutcome::Fired(ShotBall::fire(self.shot_origin(), ball_type)),
            None => ShootOutcome::Kicked,
        }
    }

    /// Slide, allowed mid-air
    pub fn try_slide(&mut self) -> bool {
        if self.is_sliding() || self.is_tricking() {
            return false;
        }
        self.slide.start(SLIDE_DURATION);
        self.slide_gave_card = false;
        true
    }

    pub fn try_trick(&mut self) -> bool {
        if self.is_sliding() || self.is_tricking() {
            return false;
        }
        self.trick.start(TRICK_DURATION);
        self.trick_index = (self.trick_index + 1) % self.trick_variants();
        true
    }

    /// Trick moves available for what is held
    pub fn trick_variants(&self) -> u32 {
        if self.inventory.is_empty() { 4 } else { 3 }
    }

    pub fn can_grab(&self) -> bool {
        self.inventory.len() < MAX_HELD_BALLS
    }

    pub fn try_grab(&mut self, ball_type: BallType) -> bool {
        if !self.can_grab() {
            return false;
        }
        self.inventory.push_back(ball_type);
        true
    }

    /// Gravity while airborne, landing on the ground line
    pub fn integrate(&mut self, dt: f32) {
        if !self.grounded {
            self.vel.y += GRAVITY * dt;
        }
        self.pos.y += self.vel.y * dt;

        if self.pos.y >= GROUND_Y {
            self.pos.y = GROUND_Y;
            self.vel.y = 0.0;
            self.grounded = true;
        }
    }

    /// Two-frame run cycle, only on the ground and not mid-kick
    pub fn animate(&mut self, dt: f32) {
        if self.is_kicking() || !self.grounded {
            return;
        }
        self.run_timer += dt;
        if self.run_timer > RUN_ANIM_SPEED {
            self.run_timer = 0.0;
            self.run_frame = (self.run_frame + 1) % 2;
        }
    }

    /// Count down every action; returns true when a trick lands this tick
    pub fn update_timers(&mut self, dt: f32) -> bool {
        self.kick.tick(dt);
        self.celebrate.tick(dt);
        self.slide.tick(dt);
        self.card_animation.tick(dt);
        self.trick.tick(dt)
    }

    pub fn chest(&self) -> Vec2 {
        self.pos + Vec2::new(CHEST_OFFSET_X, CHEST_OFFSET_Y)
    }

    fn shot_origin(&self) -> Vec2 {
        self.pos + Vec2::new(SHOT_OFFSET_X, SHOT_OFFSET_Y)
    }

    /// Running hitbox
    pub fn hitbox(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.pos.x, self.pos.y - PLAYER_HEIGHT),
            Vec2::new(self.pos.x + PLAYER_WIDTH, self.pos.y),
        )
    }

    /// Low, forward hitbox used while sliding
    pub fn slide_box(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.pos.x, self.pos.y - SLIDE_HEIGHT),
            Vec2::new(self.pos.x + SLIDE_WIDTH, self.pos.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_jump_requires_ground() {
        let mut player = Player::new(BallType::Classic);
        assert!(player.try_jump());
        assert!(!player.grounded);
        assert_eq!(player.vel.y, JUMP_VELOCITY);
        assert!(!player.try_jump());
    }

    #[test]
    fn test_jump_blocked_by_actions() {
        let mut player = Player::new(BallType::Classic);
        player.try_slide();
        assert!(!player.try_jump());
        assert!(player.grounded);
    }

    #[test]
    fn test_kick_while_airborne() {
        let mut player = Player::new(BallType::Classic);
        assert!(player.try_jump());
        assert!(matches!(player.try_shoot(), ShootOutcome::Fired(_)));
        assert!(player.is_kicking());
        assert!(!player.grounded);
    }

    #[test]
    fn test_shoot_consumes_oldest_ball() {
        let mut player = Player::new(BallType::Fevernova);
        assert!(player.try_grab(BallType::Jabulani));

        match player.try_shoot() {
            ShootOutcome::Fired(shot) => assert_eq!(shot.ball_type, BallType::Fevernova),
            other => panic!("expected a shot, got {other:?}"),
        }
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.inventory[0], BallType::Jabulani);
    }

    #[test]
    fn test_empty_shoot_still_kicks() {
        let mut player = Player::new(BallType::Classic);
        player.inventory.clear();
        assert_eq!(player.try_shoot(), ShootOutcome::Kicked);
        assert!(player.is_kicking());
        assert_eq!(player.kick.remaining(), KICK_DURATION);
    }

    #[test]
    fn test_shoot_blocked_mid_kick() {
        let mut player = Player::new(BallType::Classic);
        player.try_grab(BallType::Classic);
        assert!(matches!(player.try_shoot(), ShootOutcome::Fired(_)));
        assert_eq!(player.try_shoot(), ShootOutcome::Blocked);
        assert_eq!(player.inventory.len(), 1);
    }

    #[test]
    fn test_slide_and_trick_exclusive() {
        let mut player = Player::new(BallType::Classic);
        assert!(player.try_slide());
        assert!(!player.try_trick());
        assert!(!player.try_slide());

        let mut player = Player::new(BallType::Classic);
        assert!(player.try_trick());
        assert!(!player.try_slide());
    }

    #[test]
    fn test_slide_resets_card_flag() {
        let mut player = Player::new(BallType::Classic);
        player.slide_gave_card = true;
        assert!(player.try_slide());
        assert!(!player.slide_gave_card);
    }

    #[test]
    fn test_trick_cycle_depends_on_inventory() {
        let mut player = Player::new(BallType::Classic);
        player.inventory.clear();
        for expected in [1, 2, 3, 0] {
            player.try_trick();
            assert_eq!(player.trick_index, expected);
            player.update_timers(TRICK_DURATION);
        }

        player.try_grab(BallType::Classic);
        for expected in [1, 2, 0] {
            player.try_trick();
            assert_eq!(player.trick_index, expected);
            player.update_timers(TRICK_DURATION);
        }
    }

    #[test]
    fn test_trick_lands_once() {
        let mut player = Player::new(BallType::Classic);
        player.try_trick();
        assert!(!player.update_timers(0.25));
        assert!(player.update_timers(0.25));
        assert!(!player.update_timers(0.25));
        assert!(!player.is_tricking());
    }

    #[test]
    fn test_landing_restores_ground() {
        let mut player = Player::new(BallType::Classic);
        player.try_jump();
        let mut frames = 0;
        while !player.grounded {
            player.integrate(1.0 / 60.0);
            frames += 1;
            assert!(frames < 200);
        }
        assert_eq!(player.pos.y, GROUND_Y);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_run_cycle_pauses_mid_kick() {
        let mut player = Player::new(BallType::Classic);
        player.animate(0.2);
        assert_eq!(player.run_frame, 1);
        player.try_shoot();
        player.animate(0.2);
        assert_eq!(player.run_frame, 1);
    }

    proptest! {
        #[test]
        fn inventory_stays_bounded(ops in prop::collection::vec(0u8..3, 0..64)) {
            let mut player = Player::new(BallType::Classic);
            for op in ops {
                match op {
                    0 => { player.try_grab(BallType::Jabulani); }
                    1 => {
                        let before = player.inventory.len();
                        let was_busy = player.is_busy();
                        let outcome = player.try_shoot();
                        if was_busy {
                            prop_assert_eq!(outcome, ShootOutcome::Blocked);
                            prop_assert_eq!(player.inventory.len(), before);
                        } else if before == 0 {
                            prop_assert_eq!(outcome, ShootOutcome::Kicked);
                        } else {
                            prop_assert_eq!(player.inventory.len(), before - 1);
                        }
                        prop_assert!(player.is_kicking());
                    }
                    _ => { player.update_timers(KICK_DURATION); }
                }
                prop_assert!(player.inventory.len() <= MAX_HELD_BALLS);
            }
        }
    }
}
