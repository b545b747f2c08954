//! Best-score tracking
//!
//! Two bests are kept: the session best (this process, starts at zero) and
//! the persisted best (loaded from and saved to a `ScoreStore`).

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScores {
    /// Best score since the process started
    pub session: u64,
    /// Best score ever, as last loaded or saved
    pub persisted: u64,
}

impl BestScores {
    /// Fresh session with the stored best
    pub fn load(store: &impl ScoreStore) -> Self {
        let persisted = store.load_best_score();
        log::info!("Loaded best score {persisted}");
        Self {
            session: 0,
            persisted,
        }
    }

    /// Fold a finished session's score in.
    /// Returns true if the persisted best improved and should be saved.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.session {
            self.session = score;
        }
        if score > self.persisted {
            self.persisted = score;
            return true;
        }
        false
    }

    /// Whether `score` would beat the best ever
    pub fn is_record(&self, score: u64) -> bool {
        score > self.persisted
    }
}
