//! Best-score persistence
//!
//! Best effort only: a store that cannot be read reports 0, and a failed
//! save is logged and forgotten.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the best score lives between sessions
pub trait ScoreStore {
    /// Stored best score, 0 if missing or unreadable
    fn load_best_score(&self) -> u64;
    /// Persist a new best score; failures are ignored
    fn save_best_score(&mut self, score: u64);
}

/// In-memory store for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
    /// Number of saves performed
    pub saves: u32,
}

impl MemoryStore {
    pub fn with_best(best: u64) -> Self {
        Self { best, saves: 0 }
    }
}

impl ScoreStore for MemoryStore {
    fn load_best_score(&self) -> u64 {
        self.best
    }

    fn save_best_score(&mut self, score: u64) {
        self.best = score;
        self.saves += 1;
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct BestScoreFile {
    best_score: u64,
}

/// JSON file on the native filesystem
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileStore {
    fn load_best_score(&self) -> u64 {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No best score at {} ({e}), starting fresh", self.path.display());
                return 0;
            }
        };
        match serde_json::from_str::<BestScoreFile>(&json) {
            Ok(file) => file.best_score,
            Err(e) => {
                log::warn!("Corrupt best score file {} ({e}), using 0", self.path.display());
                0
            }
        }
    }

    fn save_best_score(&mut self, score: u64) {
        let json = match serde_json::to_string(&BestScoreFile { best_score: score }) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode best score ({e})");
                return;
            }
        };
        match std::fs::write(&self.path, json) {
            Ok(()) => log::info!("Best score {score} saved to {}", self.path.display()),
            Err(e) => log::warn!("Could not save best score to {} ({e})", self.path.display()),
        }
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "goleador-high-score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load_best_score(&self) -> u64 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, best score is 0");
            return 0;
        };
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(value)) => value.trim().parse().unwrap_or_else(|_| {
                log::warn!("Unreadable best score {value:?}, using 0");
                0
            }),
            _ => 0,
        }
    }

    fn save_best_score(&mut self, score: u64) {
        if let Some(storage) = Self::storage() {
            if storage
                .set_item(Self::STORAGE_KEY, &score.to_string())
                .is_err()
            {
                log::warn!("Could not save best score to LocalStorage");
            }
        }
    }
}
