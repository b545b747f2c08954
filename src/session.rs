//! A playable session: simulation plus its best-score store
//!
//! The store is read once at construction and written only when a session
//! ends with a new persisted best.

use crate::highscores::BestScores;
use crate::persistence::ScoreStore;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<S: ScoreStore> {
    pub state: GameState,
    store: S,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(store: S, tuning: Tuning, seed: u64) -> Self {
        let mut state = GameState::with_tuning(seed, tuning);
        state.progress.best = BestScores::load(&store);
        Self { state, store }
    }

    /// Run one frame and return the events it produced
    pub fn step(&mut self, input: &TickInput, raw_dt: f32) -> Vec<GameEvent> {
        tick(&mut self.state, input, raw_dt);
        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::GameOver {
                score,
                new_record: true,
            } = event
            {
                self.store.save_best_score(*score);
            }
        }
        events
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
