//! Audio sink
//!
//! The simulation never plays sounds. After each step the drained events are
//! mapped to cues and handed to whatever `AudioSink` the host provides.

use crate::sim::{GameEvent, GamePhase, GameState, ObstacleTag};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Ball picked up
    BallCollect,
    Kick,
    /// Ball fired from the inventory
    Shoot,
    Slide,
    Trick,
    /// Obstacle taken out, voiced per kind
    Hit(ObstacleTag),
    /// Referee whistle for a card
    Whistle,
    CrowdCheer,
    Goal,
    Milestone,
    /// New session best fanfare
    Celebration,
    GameOver,
}

/// Cues for one event, in play order
pub fn cues_for(event: &GameEvent) -> Vec<SoundCue> {
    match event {
        GameEvent::BallCollected { .. } => vec![SoundCue::BallCollect],
        GameEvent::Kick => vec![SoundCue::Kick],
        GameEvent::Shot { .. } => vec![SoundCue::Shoot],
        GameEvent::Slide => vec![SoundCue::Slide],
        GameEvent::Trick { .. } => vec![SoundCue::Trick],
        GameEvent::ObstacleHit { obstacle, .. } => vec![SoundCue::Hit(*obstacle)],
        GameEvent::Card { .. } => vec![SoundCue::Whistle],
        GameEvent::Goal { .. } => vec![SoundCue::CrowdCheer, SoundCue::Goal],
        GameEvent::Milestone { .. } => vec![SoundCue::Milestone],
        GameEvent::NewBest { .. } => vec![SoundCue::Celebration],
        GameEvent::GameOver { .. } => vec![SoundCue::GameOver],
        GameEvent::TrickLanded { .. } | GameEvent::Started | GameEvent::Restarted => Vec::new(),
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudio {
    pub muted: bool,
    /// Cues played so far
    pub played: usize,
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::debug!("sound: {cue:?}");
    }
}

/// Play every cue for a step's events
pub fn dispatch(sink: &mut impl AudioSink, events: &[GameEvent]) {
    for cue in events.iter().flat_map(cues_for) {
        sink.play(cue);
    }
}

/// Background music polls this to know when to stop
pub fn music_should_stop(state: &GameState) -> bool {
    state.phase == GamePhase::Over
}
