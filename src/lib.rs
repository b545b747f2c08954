//! Goleador - A footballer endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, spawning, collisions, messages)
//! - `session`: Owns a simulation plus its best-score store
//! - `tuning`: Data-driven game balance
//! - `persistence`: Best-score load/save collaborators
//! - `audio` / `renderer`: Read-only sinks fed by the simulation
//! - `platform`: Abstract input signals

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::BestScores;
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Frame rate the scroll speed is expressed against (px per frame at 60 Hz)
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Screen and world layout
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;
    pub const GROUND_Y: f32 = 480.0;
    /// Entities enter here
    pub const SPAWN_X_RIGHT: f32 = 850.0;
    /// Entities scrolled past this are pruned
    pub const DESPAWN_X_LEFT: f32 = -50.0;
    /// Shot balls falling below this are pruned
    pub const SHOT_BALL_FLOOR_Y: f32 = 650.0;

    /// Player physics (pixels, seconds)
    pub const GRAVITY: f32 = 1200.0;
    pub const JUMP_VELOCITY: f32 = -550.0;
    pub const PLAYER_START_X: f32 = 150.0;
    pub const PLAYER_WIDTH: f32 = 18.0;
    pub const PLAYER_HEIGHT: f32 = 46.0;
    /// Slide hitbox extends forward and is half height
    pub const SLIDE_WIDTH: f32 = 40.0;
    pub const SLIDE_HEIGHT: f32 = 20.0;
    /// Ball grab point relative to the player's feet
    pub const CHEST_OFFSET_X: f32 = 12.0;
    pub const CHEST_OFFSET_Y: f32 = -20.0;
    pub const GRAB_DISTANCE: f32 = 30.0;
    /// Shot balls leave from here, relative to the player's feet
    pub const SHOT_OFFSET_X: f32 = 30.0;
    pub const SHOT_OFFSET_Y: f32 = -30.0;

    /// Action durations (seconds)
    pub const KICK_DURATION: f32 = 0.2;
    pub const SLIDE_DURATION: f32 = 0.6;
    pub const TRICK_DURATION: f32 = 0.5;
    pub const CELEBRATION_DURATION: f32 = 0.6;
    pub const CARD_ANIMATION_DURATION: f32 = 1.5;
    pub const RUN_ANIM_SPEED: f32 = 0.15;
    /// Delay between the session ending and the game-over screen
    pub const GAME_OVER_DELAY: f32 = 0.5;

    /// Ball physics
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_GRAVITY: f32 = 800.0;
    pub const BALL_BOUNCE_VELOCITY: f32 = -250.0;
    pub const BALL_SPAWN_VY: f32 = -200.0;
    pub const BALL_SPAWN_HEIGHT: f32 = 30.0;
    /// Free balls scroll faster than the field
    pub const BALL_SCROLL_FACTOR: f32 = 1.3;
    /// Balls rest this far above the ground line
    pub const BALL_GROUND_CLEARANCE: f32 = 5.0;
    pub const SHOT_BALL_VX: f32 = 500.0;
    pub const SHOT_BALL_VY: f32 = -100.0;
    pub const SHOT_BALL_RESTITUTION: f32 = 0.6;

    /// Obstacle dimensions
    pub const CONE_WIDTH: f32 = 24.0;
    pub const CONE_HEIGHT: f32 = 40.0;
    pub const DARK_CONE_HEIGHT: f32 = 60.0;
    pub const RIVAL_WIDTH: f32 = 20.0;
    pub const RIVAL_HEIGHT_FRANCE: f32 = 55.0;
    pub const RIVAL_HEIGHT_BRAZIL: f32 = 65.0;
    pub const RIVAL_HEIGHT_VARIATION: i32 = 5;
    pub const RIVAL_FALLEN_HEIGHT: f32 = 15.0;
    pub const BOTTLE_WIDTH: f32 = 10.0;
    pub const BOTTLE_HEIGHT: f32 = 18.0;
    pub const BENCH_WIDTH: f32 = 40.0;
    pub const BENCH_HEIGHT: f32 = 30.0;
    pub const GOAL_WIDTH: f32 = 45.0;
    pub const GOAL_HEIGHT: f32 = 60.0;
    /// Goal net sits this far inside the posts and crossbar
    pub const GOAL_NET_INSET: f32 = 4.0;
    pub const DRONE_WIDTH: f32 = 32.0;
    pub const DRONE_HEIGHT: f32 = 12.0;
    pub const MULTI_SPAWN_RIVAL_SPACING: f32 = 40.0;
    pub const MULTI_SPAWN_CONE_SPACING: f32 = 35.0;

    /// Effects
    pub const MAX_PARTICLES: usize = 512;
    pub const EXPLOSION_PARTICLE_COUNT: usize = 15;
    pub const CONFETTI_PARTICLE_COUNT: usize = 5;
    pub const FIREWORK_PARTICLE_COUNT: usize = 25;
    pub const CONFETTI_SPAWN_INTERVAL: f32 = 0.1;
    pub const CONFETTI_MAX_DURATION: f32 = 7.0;
    pub const CROWD_START_Y: f32 = 50.0;

    /// Palette (0xRRGGBB)
    pub const COLOR_CONE_ORANGE: u32 = 0xff6600;
    pub const COLOR_CONE_YELLOW: u32 = 0xffee00;
    pub const COLOR_DARK_CONE: u32 = 0x1a1a1a;
    pub const COLOR_FRANCE_JERSEY: u32 = 0x0055dd;
    pub const COLOR_BRAZIL_JERSEY: u32 = 0xffdd00;
    pub const COLOR_BOTTLE_GREEN: u32 = 0x006633;
    pub const COLOR_BENCH_SEAT_BLUE: u32 = 0x0055dd;
    pub const COLOR_BENCH_SEAT_BLACK: u32 = 0x1a1a1a;
    pub const COLOR_GOAL_POST: u32 = 0xffffff;
    pub const COLOR_DRONE_BODY: u32 = 0x333333;
    pub const COLOR_PLAYER_JERSEY: u32 = 0xff0000;
    pub const COLOR_SCORE_NORMAL: u32 = 0xffffff;
    pub const COLOR_SCORE_GOLD: u32 = 0xffd700;
    pub const COLOR_SCORE_FLASH: u32 = 0xffff00;

    pub const SKIN_TONES: [u32; 3] = [0xffdbac, 0xc68642, 0x8d5524];
    pub const HAIR_COLORS: [u32; 3] = [0x000000, 0x4a3020, 0x8b4513];
    pub const CONFETTI_COLORS: [u32; 8] = [
        0xff0000, 0xffff00, 0x00ff00, 0x0000ff, 0xff00ff, 0x00ffff, 0xffd700, 0xff8800,
    ];
    /// Red and white lead, blue and gold accents
    pub const FIREWORK_COLORS: [u32; 10] = [
        0xff0000, 0xff0000, 0xff0000, 0xffffff, 0xffffff, 0xffffff, 0x0000ff, 0x0000ff, 0xffd700,
        0xff8800,
    ];
    pub const FIREWORK_ORIGINS: [(f32, f32); 3] = [(200.0, 150.0), (400.0, 100.0), (600.0, 150.0)];
}
