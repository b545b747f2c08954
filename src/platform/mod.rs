//! Platform input layer
//!
//! Hosts report which action keys are held; `EdgeDetector` turns successive
//! snapshots into the edge-triggered `TickInput` the simulation consumes.
//! Raw device codes never reach the core.

use crate::sim::{GamePhase, GameState, TickInput};

/// Held state of the four action directions (arrows or WASD)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionKeys {
    /// Jump
    pub up: bool,
    /// Slide
    pub down: bool,
    /// Trick
    pub left: bool,
    /// Shoot
    pub right: bool,
}

impl ActionKeys {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Map a browser `KeyboardEvent.key` value to a direction
    pub fn press_key(&mut self, key: &str, down: bool) -> bool {
        let slot = match key {
            "ArrowUp" | "w" | "W" => &mut self.up,
            "ArrowDown" | "s" | "S" => &mut self.down,
            "ArrowLeft" | "a" | "A" => &mut self.left,
            "ArrowRight" | "d" | "D" => &mut self.right,
            _ => return false,
        };
        *slot = down;
        true
    }
}

/// Converts held snapshots into per-tick input
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous: ActionKeys,
}

impl EdgeDetector {
    pub fn update(&mut self, keys: ActionKeys) -> TickInput {
        let prev = self.previous;
        self.previous = keys;
        let pressed = |now: bool, before: bool| now && !before;

        TickInput {
            jump: keys.up,
            shoot: pressed(keys.right, prev.right),
            slide: pressed(keys.down, prev.down),
            trick: pressed(keys.left, prev.left),
            direction_held: keys.any(),
            restart: pressed(keys.up, prev.up)
                || pressed(keys.down, prev.down)
                || pressed(keys.left, prev.left)
                || pressed(keys.right, prev.right),
        }
    }
}

/// Anything that can report held keys each frame
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> ActionKeys;
}

/// Scripted player for headless runs and demos
///
/// Shoots standing obstacles when holding a ball, otherwise jumps them.
/// Keys are released every other frame so edges keep firing.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    frame: u64,
}

impl Autopilot {
    /// Start shooting when an obstacle is this close (px)
    const SHOOT_RANGE: f32 = 220.0;
    /// Jump when the gap to an obstacle falls below this (px)
    const JUMP_GAP: f32 = 35.0;
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> ActionKeys {
        self.frame += 1;
        let release = self.frame % 2 == 0;
        let mut keys = ActionKeys::default();

        match state.phase {
            GamePhase::NotStarted | GamePhase::Over => {
                keys.right = !release;
                return keys;
            }
            GamePhase::Running => {}
            GamePhase::CardFrozen | GamePhase::Ending => return keys,
        }

        let player = &state.player;
        let front = player.pos.x + crate::consts::PLAYER_WIDTH;
        let ahead = state
            .obstacles
            .iter()
            .filter(|o| !o.is_flying() && !o.is_fallen() && o.pos.x + o.width > player.pos.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

        if let Some(obstacle) = ahead {
            let gap = obstacle.pos.x - front;
            if !player.inventory.is_empty() && gap < Self::SHOOT_RANGE && !release {
                keys.right = true;
            } else if gap < Self::JUMP_GAP {
                keys.up = true;
            }
        }
        keys
    }
}
