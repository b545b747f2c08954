//! Collision detection and response
//!
//! Everything is axis-aligned boxes. Ground obstacles are anchored at their
//! ground contact point, flying ones at their vertical center (see
//! `Obstacle::bounds`).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::state::GameState;
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of half-extent `half` around `center`
    pub fn around(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Strictly inside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }
}

/// Collect free balls near the player's chest while there is room
pub fn collect_balls(state: &mut GameState) {
    let chest = state.player.chest();
    let mut i = 0;
    while i < state.balls.len() {
        let ball = &state.balls[i];
        if ball.pos.distance(chest) < GRAB_DISTANCE && state.player.can_grab() {
            let ball_type = ball.ball_type;
            state.balls.remove(i);
            state.player.try_grab(ball_type);
            state.progress.add(state.tuning.ball_grab_points);
            state.emit(GameEvent::BallCollected { ball_type });
        } else {
            i += 1;
        }
    }
}

/// What a shot ball touched first
enum ShotContact {
    Net(usize),
    Body(usize),
}

/// Shot balls against goals and obstacles; first contact per ball only
pub fn resolve_shot_balls(state: &mut GameState) {
    let mut i = 0;
    while i < state.shot_balls.len() {
        let ball = &state.shot_balls[i];
        let ball_box = ball.bounds();
        let contact = state
            .obstacles
            .iter()
            .enumerate()
            .rev()
            .find_map(|(j, obstacle)| {
                if obstacle.is_goal() {
                    obstacle.net().contains(ball.pos).then_some(ShotContact::Net(j))
                } else if !obstacle.is_fallen() && obstacle.bounds().overlaps(&ball_box) {
                    Some(ShotContact::Body(j))
                } else {
                    None
                }
            });

        match contact {
            Some(ShotContact::Net(j)) => {
                state.shot_balls.remove(i);
                state.obstacles.remove(j);
                state.score_goal();
            }
            Some(ShotContact::Body(j)) => {
                state.shot_balls.remove(i);
                if let Some((obstacle, pos)) = state.knock_out(j) {
                    let points = state.award_hit();
                    state.emit(GameEvent::ObstacleHit {
                        obstacle,
                        pos,
                        points,
                        by_slide: false,
                    });
                }
            }
            None => i += 1,
        }
    }
}

/// Slide tackles: every overlapped obstacle goes down, one card per slide
pub fn resolve_slide(state: &mut GameState) {
    if !state.player.is_sliding() {
        return;
    }
    let slide_box = state.player.slide_box();
    let mut j = state.obstacles.len();
    while j > 0 {
        j -= 1;
        let obstacle = &state.obstacles[j];
        if obstacle.is_fallen() || !obstacle.bounds().overlaps(&slide_box) {
            continue;
        }
        let Some((tag, pos)) = state.knock_out(j) else {
            continue;
        };
        let points = state.award_hit();
        state.emit(GameEvent::ObstacleHit {
            obstacle: tag,
            pos,
            points,
            by_slide: true,
        });

        // Only the first tackle of a slide draws the card and its effects
        if !state.player.slide_gave_card {
            state.player.slide_gave_card = true;
            state.clock.shake(8.0);
            state.clock.slow_motion(0.3, 0.3);
            state.issue_card();
        }
    }
}

/// Any standing obstacle touching the running hitbox ends the run
pub fn lethal_contact(state: &GameState) -> bool {
    if state.player.is_sliding() {
        return false;
    }
    let hitbox = state.player.hitbox();
    state
        .obstacles
        .iter()
        .any(|o| !o.is_fallen() && o.bounds().overlaps(&hitbox))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Appearance, Ball, BallType, HairStyle, Obstacle, ShotBall, Team};
    use crate::sim::events::CardColor;
    use crate::sim::messages::Channel;
    use crate::sim::state::GamePhase;

    fn running_state() -> GameState {
        let mut state = GameState::new(42);
        state.start();
        state.drain_events();
        state
    }

    fn rival(x: f32) -> Obstacle {
        let appearance = Appearance {
            skin_tone: SKIN_TONES[1],
            hair_color: HAIR_COLORS[1],
            hair_style: HairStyle::Curly,
            mustache: true,
            beard: false,
        };
        Obstacle::rival(x, Team::France, RIVAL_HEIGHT_FRANCE, appearance, 0)
    }

    fn ball_at_chest(state: &GameState, ball_type: BallType) -> Ball {
        let mut ball = Ball::spawn(ball_type);
        ball.pos = state.player.chest();
        ball
    }

    #[test]
    fn test_aabb_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let c = Aabb::new(Vec2::new(9.0, 9.0), Vec2::new(20.0, 20.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
        assert!(a.contains(Vec2::splat(5.0)));
        assert!(!a.contains(Vec2::new(10.0, 5.0)));
    }

    #[test]
    fn test_grab_then_goal_scores_105() {
        let mut state = running_state();
        state.player.inventory.clear();

        let ball = ball_at_chest(&state, BallType::Jabulani);
        state.balls.push(ball);
        collect_balls(&mut state);
        assert_eq!(state.progress.score, 5);
        assert!(state.balls.is_empty());
        assert_eq!(state.player.inventory.len(), 1);

        let goal = Obstacle::goal(400.0);
        let mut shot = ShotBall::fire(Vec2::ZERO, BallType::Jabulani);
        shot.pos = goal.net().min + Vec2::splat(10.0);
        state.obstacles.push(goal);
        state.shot_balls.push(shot);
        resolve_shot_balls(&mut state);

        assert_eq!(state.progress.score, 105);
        assert!(state.obstacles.is_empty());
        assert!(state.shot_balls.is_empty());
        let (channel, banner) = state.messages.visible().unwrap();
        assert_eq!(channel, Channel::Goal);
        assert_eq!(banner.text, "GOAL!");
        assert!(state.player.celebrate.is_active());
        assert_eq!(state.progress.last_milestone, 0);
        assert!(state.events.contains(&GameEvent::Goal { points: 100 }));
    }

    #[test]
    fn test_full_inventory_rejects_grab() {
        let mut state = running_state();
        state.player.try_grab(BallType::Fevernova);
        assert_eq!(state.player.inventory.len(), 2);

        let ball = ball_at_chest(&state, BallType::Classic);
        state.balls.push(ball);
        collect_balls(&mut state);

        assert_eq!(state.player.inventory.len(), 2);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.progress.score, 0);
    }

    #[test]
    fn test_shot_knocks_down_rival() {
        let mut state = running_state();
        let target = rival(400.0);
        let mut shot = ShotBall::fire(Vec2::ZERO, BallType::Classic);
        shot.pos = target.center();
        state.obstacles.push(target);
        state.shot_balls.push(shot);

        resolve_shot_balls(&mut state);
        assert_eq!(state.progress.score, 10);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.obstacles[0].is_fallen());
        assert!(state.shot_balls.is_empty());
        assert_eq!(state.particles.len(), EXPLOSION_PARTICLE_COUNT);

        // Fallen rivals are inert
        let mut shot = ShotBall::fire(Vec2::ZERO, BallType::Classic);
        shot.pos = state.obstacles[0].center();
        state.shot_balls.push(shot);
        resolve_shot_balls(&mut state);
        assert_eq!(state.shot_balls.len(), 1);
        assert_eq!(state.progress.score, 10);
    }

    #[test]
    fn test_one_ball_hits_one_obstacle() {
        let mut state = running_state();
        let first = Obstacle::cone(400.0, false, false);
        let second = Obstacle::cone(410.0, false, true);
        let mut shot = ShotBall::fire(Vec2::ZERO, BallType::Classic);
        shot.pos = Vec2::new(415.0, GROUND_Y - 10.0);
        state.obstacles.push(first);
        state.obstacles.push(second);
        state.shot_balls.push(shot);

        resolve_shot_balls(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.progress.score, 10);
    }

    #[test]
    fn test_ball_on_goal_post_does_not_score() {
        let mut state = running_state();
        let goal = Obstacle::goal(400.0);
        let mut shot = ShotBall::fire(Vec2::ZERO, BallType::Classic);
        shot.pos = Vec2::new(401.0, GROUND_Y - 30.0);
        state.obstacles.push(goal);
        state.shot_balls.push(shot);

        resolve_shot_balls(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.shot_balls.len(), 1);
        assert_eq!(state.progress.score, 0);
    }

    #[test]
    fn test_one_card_per_slide() {
        let mut state = running_state();
        let x = state.player.pos.x;
        state.obstacles.push(Obstacle::cone(x + 5.0, false, false));
        state.obstacles.push(rival(x + 10.0));
        state.obstacles.push(Obstacle::bench(x + 15.0, true));
        assert!(state.player.try_slide());

        resolve_slide(&mut state);
        assert_eq!(state.player.cards, 1);
        assert!(state.player.slide_gave_card);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.obstacles[0].is_fallen());
        let cards = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Card { .. }))
            .count();
        assert_eq!(cards, 1);
        assert_eq!(state.messages.banner(Channel::Card).text, "YELLOW CARD");
        assert_eq!(state.clock.time_scale, 0.3);
        assert_eq!(state.phase, GamePhase::Running);

        // More obstacles later in the same slide draw no further card
        state.obstacles.push(Obstacle::cone(x + 5.0, true, false));
        resolve_slide(&mut state);
        assert_eq!(state.player.cards, 1);
        assert!(!lethal_contact(&state));
    }

    #[test]
    fn test_later_tackles_keep_slow_motion_running() {
        let mut state = running_state();
        let x = state.player.pos.x;
        state.obstacles.push(Obstacle::cone(x + 5.0, false, false));
        assert!(state.player.try_slide());
        resolve_slide(&mut state);
        assert_eq!(state.clock.slow_motion_remaining, 0.3);

        state.clock.advance(0.25);
        let remaining = state.clock.slow_motion_remaining;
        let shake = state.clock.camera_shake;
        state.obstacles.push(Obstacle::cone(x + 5.0, true, false));
        resolve_slide(&mut state);

        assert!(state.obstacles.is_empty());
        assert_eq!(state.progress.score, 20);
        assert_eq!(state.player.cards, 1);
        assert_eq!(state.clock.slow_motion_remaining, remaining);
        assert_eq!(state.clock.time_scale, 0.3);
        // Hit shake never lowers the tackle shake
        assert_eq!(state.clock.camera_shake, shake.max(3.0));
    }

    #[test]
    fn test_second_card_is_red_and_freezes() {
        let mut state = running_state();
        let x = state.player.pos.x;
        for _ in 0..2 {
            state.player.slide.cancel();
            state.obstacles.push(Obstacle::cone(x + 5.0, false, false));
            assert!(state.player.try_slide());
            resolve_slide(&mut state);
        }
        assert_eq!(state.player.cards, 2);
        assert_eq!(state.phase, GamePhase::CardFrozen);
        assert!(state.player.card_animation.is_active());
        assert!(state.events.contains(&GameEvent::Card {
            color: CardColor::Red
        }));
        assert_eq!(state.messages.banner(Channel::Card).text, "RED CARD");
    }

    #[test]
    fn test_card_issued_even_when_banner_blocked() {
        let mut state = running_state();
        state
            .messages
            .request(Channel::HighScore, "NEW HIGH SCORE!", 3.0);
        let x = state.player.pos.x;
        state.obstacles.push(Obstacle::cone(x + 5.0, false, false));
        state.player.try_slide();
        resolve_slide(&mut state);

        assert_eq!(state.player.cards, 1);
        assert_eq!(
            state.messages.visible().map(|(c, _)| c),
            Some(Channel::HighScore)
        );
    }

    #[test]
    fn test_lethal_contact() {
        let mut state = running_state();
        let x = state.player.pos.x;
        state.obstacles.push(Obstacle::cone(x + 5.0, false, false));
        assert!(lethal_contact(&state));

        state.obstacles[0].pos.x = x + 100.0;
        assert!(!lethal_contact(&state));

        let mut down = rival(x + 5.0);
        down.knock_down();
        state.obstacles.push(down);
        assert!(!lethal_contact(&state));
    }

    #[test]
    fn test_flying_obstacle_clears_running_player() {
        let mut state = running_state();
        let x = state.player.pos.x;
        state
            .obstacles
            .push(Obstacle::bottle(x + 5.0, GROUND_Y - 120.0));
        assert!(!lethal_contact(&state));

        // Jumping into it is fatal
        state.player.pos.y = GROUND_Y - 80.0;
        assert!(lethal_contact(&state));
    }
}
