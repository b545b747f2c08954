//! Per-frame simulation step
//!
//! One call advances the state by one rendered frame. Everything inside a
//! step runs in a fixed order (timers, input, physics, spawn, move, collide)
//! and finishes before the next frame's input is sampled.

use super::collision::{collect_balls, lethal_contact, resolve_shot_balls, resolve_slide};
use super::difficulty::Difficulty;
use super::effects;
use super::events::GameEvent;
use super::player::ShootOutcome;
use super::spawn::spawn_entities;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key held
    pub jump: bool,
    /// Shoot key went down this frame
    pub shoot: bool,
    /// Slide key went down this frame
    pub slide: bool,
    /// Trick key went down this frame
    pub trick: bool,
    /// Any direction key held (leaves the start screen)
    pub direction_held: bool,
    /// Restart requested from the game-over screen
    pub restart: bool,
}

/// Advance the game state by one frame of `raw_dt` real seconds
pub fn tick(state: &mut GameState, input: &TickInput, raw_dt: f32) {
    let dt = state.clock.scale(raw_dt);
    state.time_ticks += 1;

    match state.phase {
        GamePhase::NotStarted => {
            if input.direction_held {
                state.start();
            }
        }
        GamePhase::Running => run(state, input, dt),
        GamePhase::CardFrozen => frozen(state, dt),
        GamePhase::Ending => ending(state, dt),
        GamePhase::Over => {
            effects::update(&mut state.particles, dt);
            if input.restart {
                state.restart();
            }
        }
    }
}

fn run(state: &mut GameState, input: &TickInput, dt: f32) {
    state.game_time += dt;
    state.difficulty = Difficulty::at(&state.tuning, state.progress.score, state.game_time);
    state
        .progress
        .accrue_passive(dt, state.tuning.passive_points_per_second);

    update_timers(state, dt);
    state.update_confetti(dt);
    apply_input(state, input);

    state.player.integrate(dt);
    state.player.animate(dt);

    let scroll = state.scroll(dt);
    spawn_entities(state, dt, scroll);
    move_entities(state, dt, scroll);

    collect_balls(state);
    resolve_shot_balls(state);
    resolve_slide(state);
    if state.phase == GamePhase::Running && lethal_contact(state) {
        state.end_session();
    }

    state.check_progress();
}

/// Red card: the world holds still until the card animation finishes
fn frozen(state: &mut GameState, dt: f32) {
    state.clock.advance(dt);
    state.messages.tick(dt);
    state.progress.tick_timers(dt);
    state.player.update_timers(dt);
    effects::update(&mut state.particles, dt);

    if !state.player.card_animation.is_active() {
        state.end_session();
    }
}

fn ending(state: &mut GameState, dt: f32) {
    state.clock.advance(dt);
    state.messages.tick(dt);
    state.progress.tick_timers(dt);
    effects::update(&mut state.particles, dt);

    state.phase_timer -= dt;
    if state.phase_timer <= 0.0 {
        state.phase_timer = 0.0;
        state.phase = GamePhase::Over;
        state.clock.reset_time_scale();
        log::info!("Game over screen (score {})", state.progress.score);
    }
}

fn update_timers(state: &mut GameState, dt: f32) {
    state.clock.advance(dt);
    state.messages.tick(dt);
    state.progress.tick_timers(dt);

    if state.player.update_timers(dt) {
        let points = state.tuning.trick_points;
        state.progress.add(points);
        state.emit(GameEvent::TrickLanded { points });
    }
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    if input.jump {
        state.player.try_jump();
    }

    if input.shoot {
        match state.player.try_shoot() {
            ShootOutcome::Blocked => {}
            ShootOutcome::Kicked => state.emit(GameEvent::Kick),
            ShootOutcome::Fired(shot) => {
                let ball_type = shot.ball_type;
                state.shot_balls.push(shot);
                state.emit(GameEvent::Kick);
                state.emit(GameEvent::Shot { ball_type });
            }
        }
    }

    if input.slide && state.player.try_slide() {
        state.emit(GameEvent::Slide);
    }

    if input.trick && state.player.try_trick() {
        let index = state.player.trick_index;
        state.emit(GameEvent::Trick { index });
    }
}

/// Scroll and integrate every store, dropping what left the field
fn move_entities(state: &mut GameState, dt: f32, scroll: f32) {
    for ball in &mut state.balls {
        ball.advance(scroll, dt);
    }
    state.balls.retain(|b| !b.off_screen());

    for shot in &mut state.shot_balls {
        shot.advance(dt);
    }
    state.shot_balls.retain(|s| !s.out_of_bounds());

    for obstacle in &mut state.obstacles {
        obstacle.advance(scroll, dt);
    }
    state.obstacles.retain(|o| !o.off_screen());

    effects::update(&mut state.particles, dt);
}
