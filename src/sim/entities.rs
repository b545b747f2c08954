//! Entity types for the four independent stores
//!
//! Free balls, shot balls, obstacles and particles. Each store is a plain
//! `Vec` owned by `GameState`, advanced and pruned on its own every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Ball designs a player can collect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BallType {
    #[default]
    Classic,
    Fevernova,
    Jabulani,
}

impl BallType {
    pub const ALL: [BallType; 3] = [BallType::Classic, BallType::Fevernova, BallType::Jabulani];

    pub fn as_str(&self) -> &'static str {
        match self {
            BallType::Classic => "classic",
            BallType::Fevernova => "fevernova",
            BallType::Jabulani => "jabulani",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(BallType::Classic),
            "fevernova" => Some(BallType::Fevernova),
            "jabulani" => Some(BallType::Jabulani),
            _ => None,
        }
    }

    /// Parse a tag, substituting `Classic` for anything unknown
    pub fn from_tag(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            log::warn!("Unknown ball type {s:?}, using classic");
            BallType::Classic
        })
    }
}

impl From<String> for BallType {
    fn from(s: String) -> Self {
        Self::from_tag(&s)
    }
}

impl From<BallType> for String {
    fn from(ball: BallType) -> Self {
        ball.as_str().to_string()
    }
}

/// A bouncing ball waiting to be grabbed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vy: f32,
    pub radius: f32,
    pub ball_type: BallType,
}

impl Ball {
    pub fn spawn(ball_type: BallType) -> Self {
        Self {
            pos: Vec2::new(SPAWN_X_RIGHT, GROUND_Y - BALL_SPAWN_HEIGHT),
            vy: BALL_SPAWN_VY,
            radius: BALL_RADIUS,
            ball_type,
        }
    }

    /// Scroll left with the field and bounce on the ground
    pub fn advance(&mut self, scroll: f32, dt: f32) {
        self.pos.x -= scroll * BALL_SCROLL_FACTOR;
        self.vy += BALL_GRAVITY * dt;
        self.pos.y += self.vy * dt;

        let rest_y = GROUND_Y - BALL_GROUND_CLEARANCE;
        if self.pos.y >= rest_y {
            self.pos.y = rest_y;
            self.vy = BALL_BOUNCE_VELOCITY;
        }
    }

    pub fn off_screen(&self) -> bool {
        self.pos.x < DESPAWN_X_LEFT
    }
}

/// A ball in flight after being fired from the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotBall {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub ball_type: BallType,
}

impl ShotBall {
    pub fn fire(from: Vec2, ball_type: BallType) -> Self {
        Self {
            pos: from,
            vel: Vec2::new(SHOT_BALL_VX, SHOT_BALL_VY),
            radius: BALL_RADIUS,
            ball_type,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel.y += BALL_GRAVITY * dt;

        let rest_y = GROUND_Y - BALL_GROUND_CLEARANCE;
        if self.pos.y >= rest_y {
            self.pos.y = rest_y;
            self.vel.y = -self.vel.y * SHOT_BALL_RESTITUTION;
        }
    }

    pub fn out_of_bounds(&self) -> bool {
        self.pos.x > SPAWN_X_RIGHT || self.pos.y > SHOT_BALL_FLOOR_Y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::around(self.pos, Vec2::splat(self.radius))
    }
}

/// Rival team, which sets jersey colour and height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    France,
    Brazil,
}

impl Team {
    pub fn base_height(&self) -> f32 {
        match self {
            Team::France => RIVAL_HEIGHT_FRANCE,
            Team::Brazil => RIVAL_HEIGHT_BRAZIL,
        }
    }

    pub fn jersey(&self) -> u32 {
        match self {
            Team::France => COLOR_FRANCE_JERSEY,
            Team::Brazil => COLOR_BRAZIL_JERSEY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HairStyle {
    Short,
    Tall,
    Curly,
    Bald,
}

impl HairStyle {
    pub const ALL: [HairStyle; 4] = [
        HairStyle::Short,
        HairStyle::Tall,
        HairStyle::Curly,
        HairStyle::Bald,
    ];
}

/// Cosmetic look of a rival player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub skin_tone: u32,
    pub hair_color: u32,
    pub hair_style: HairStyle,
    pub mustache: bool,
    pub beard: bool,
}

/// Obstacle variants, each carrying only its own state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Cone {
        dark: bool,
        /// Yellow instead of orange
        alt_color: bool,
    },
    Rival {
        team: Team,
        appearance: Appearance,
        fallen: bool,
        run_frame: u8,
        run_timer: f32,
    },
    Bottle {
        rotation: f32,
    },
    Bench {
        /// Black seat instead of blue
        dark_seat: bool,
    },
    Goal,
    Drone {
        propeller: f32,
    },
}

/// Payload-free obstacle kind, carried by events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleTag {
    Cone,
    DarkCone,
    Rival,
    Bottle,
    Bench,
    Goal,
    Drone,
}

/// An obstacle; `pos` is the ground contact point for ground kinds and the
/// vertical center for flying kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn cone(x: f32, dark: bool, alt_color: bool) -> Self {
        Self {
            pos: Vec2::new(x, GROUND_Y),
            width: CONE_WIDTH,
            height: if dark { DARK_CONE_HEIGHT } else { CONE_HEIGHT },
            kind: ObstacleKind::Cone { dark, alt_color },
        }
    }

    pub fn rival(x: f32, team: Team, height: f32, appearance: Appearance, run_frame: u8) -> Self {
        Self {
            pos: Vec2::new(x, GROUND_Y),
            width: RIVAL_WIDTH,
            height,
            kind: ObstacleKind::Rival {
                team,
                appearance,
                fallen: false,
                run_frame,
                run_timer: 0.0,
            },
        }
    }

    pub fn goal(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, GROUND_Y),
            width: GOAL_WIDTH,
            height: GOAL_HEIGHT,
            kind: ObstacleKind::Goal,
        }
    }

    pub fn bench(x: f32, dark_seat: bool) -> Self {
        Self {
            pos: Vec2::new(x, GROUND_Y),
            width: BENCH_WIDTH,
            height: BENCH_HEIGHT,
            kind: ObstacleKind::Bench { dark_seat },
        }
    }

    pub fn bottle(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width: BOTTLE_WIDTH,
            height: BOTTLE_HEIGHT,
            kind: ObstacleKind::Bottle { rotation: 0.0 },
        }
    }

    pub fn drone(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            width: DRONE_WIDTH,
            height: DRONE_HEIGHT,
            kind: ObstacleKind::Drone { propeller: 0.0 },
        }
    }

    pub fn tag(&self) -> ObstacleTag {
        match self.kind {
            ObstacleKind::Cone { dark: true, .. } => ObstacleTag::DarkCone,
            ObstacleKind::Cone { .. } => ObstacleTag::Cone,
            ObstacleKind::Rival { .. } => ObstacleTag::Rival,
            ObstacleKind::Bottle { .. } => ObstacleTag::Bottle,
            ObstacleKind::Bench { .. } => ObstacleTag::Bench,
            ObstacleKind::Goal => ObstacleTag::Goal,
            ObstacleKind::Drone { .. } => ObstacleTag::Drone,
        }
    }

    pub fn is_flying(&self) -> bool {
        matches!(self.kind, ObstacleKind::Bottle { .. } | ObstacleKind::Drone { .. })
    }

    pub fn is_goal(&self) -> bool {
        matches!(self.kind, ObstacleKind::Goal)
    }

    pub fn is_fallen(&self) -> bool {
        matches!(self.kind, ObstacleKind::Rival { fallen: true, .. })
    }

    /// Bottom-anchored for ground kinds, center-anchored for flying kinds
    pub fn bounds(&self) -> Aabb {
        if self.is_flying() {
            Aabb::new(
                Vec2::new(self.pos.x, self.pos.y - self.height / 2.0),
                Vec2::new(self.pos.x + self.width, self.pos.y + self.height / 2.0),
            )
        } else {
            Aabb::new(
                Vec2::new(self.pos.x, self.pos.y - self.height),
                Vec2::new(self.pos.x + self.width, self.pos.y),
            )
        }
    }

    /// Scoring area of a goal, inset from the posts and crossbar
    pub fn net(&self) -> Aabb {
        Aabb::new(
            Vec2::new(
                self.pos.x + GOAL_NET_INSET,
                self.pos.y - self.height + GOAL_NET_INSET,
            ),
            Vec2::new(self.pos.x + self.width - GOAL_NET_INSET, self.pos.y),
        )
    }

    /// Explosion anchor, the middle of the hit box
    pub fn center(&self) -> Vec2 {
        let y = if self.is_flying() {
            self.pos.y
        } else {
            self.pos.y - self.height / 2.0
        };
        Vec2::new(self.pos.x + self.width / 2.0, y)
    }

    /// Signature colour used for hit explosions
    pub fn color(&self) -> u32 {
        match &self.kind {
            ObstacleKind::Cone { dark: true, .. } => COLOR_DARK_CONE,
            ObstacleKind::Cone { alt_color: true, .. } => COLOR_CONE_YELLOW,
            ObstacleKind::Cone { .. } => COLOR_CONE_ORANGE,
            ObstacleKind::Rival { team, .. } => team.jersey(),
            ObstacleKind::Bottle { .. } => COLOR_BOTTLE_GREEN,
            ObstacleKind::Bench { dark_seat: true } => COLOR_BENCH_SEAT_BLACK,
            ObstacleKind::Bench { dark_seat: false } => COLOR_BENCH_SEAT_BLUE,
            ObstacleKind::Goal => COLOR_GOAL_POST,
            ObstacleKind::Drone { .. } => COLOR_DRONE_BODY,
        }
    }

    /// Tackle a rival; returns false for every other kind
    pub fn knock_down(&mut self) -> bool {
        if let ObstacleKind::Rival { fallen, .. } = &mut self.kind {
            *fallen = true;
            self.height = RIVAL_FALLEN_HEIGHT;
            true
        } else {
            false
        }
    }

    /// Scroll left and run per-kind animation
    pub fn advance(&mut self, scroll: f32, dt: f32) {
        self.pos.x -= scroll;
        // Bob amplitudes are per 60 Hz frame
        let frames = dt * REFERENCE_FPS;
        match &mut self.kind {
            ObstacleKind::Bottle { rotation } => {
                self.pos.y += (self.pos.x * 0.02).sin() * 2.0 * frames;
                *rotation += dt * 8.0;
            }
            ObstacleKind::Drone { propeller } => {
                *propeller += dt * 20.0;
                self.pos.y += (self.pos.x * 0.05).sin() * 0.5 * frames;
            }
            ObstacleKind::Rival {
                fallen: false,
                run_frame,
                run_timer,
                ..
            } => {
                *run_timer += dt;
                if *run_timer > RUN_ANIM_SPEED {
                    *run_timer = 0.0;
                    *run_frame = (*run_frame + 1) % 2;
                }
            }
            _ => {}
        }
    }

    pub fn off_screen(&self) -> bool {
        self.pos.x < DESPAWN_X_LEFT
    }
}

/// Particle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Explosion,
    Confetti,
    Firework,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: u32,
    pub rotation: f32,
}

impl Particle {
    pub fn advance(&mut self, dt: f32) {
        self.life -= dt;
        match self.kind {
            ParticleKind::Confetti => {
                self.vel = Vec2::new((self.life * 8.0).sin() * 30.0, 80.0);
                self.rotation += dt * 10.0;
            }
            ParticleKind::Firework => {
                self.vel.x *= 0.95;
                self.vel.y += 300.0 * dt;
            }
            ParticleKind::Explosion => {
                self.vel.x *= 0.98;
                self.vel.y += 400.0 * dt;
            }
        }
        self.pos += self.vel * dt;
    }

    /// Fade for renderers; confetti stays opaque
    pub fn alpha(&self) -> f32 {
        match self.kind {
            ParticleKind::Confetti => 1.0,
            _ if self.max_life > 0.0 => (self.life / self.max_life).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appearance() -> Appearance {
        Appearance {
            skin_tone: SKIN_TONES[0],
            hair_color: HAIR_COLORS[0],
            hair_style: HairStyle::Short,
            mustache: false,
            beard: false,
        }
    }

    #[test]
    fn test_ball_type_tags() {
        assert_eq!(BallType::parse("Fevernova"), Some(BallType::Fevernova));
        assert_eq!(BallType::parse("tango"), None);
        assert_eq!(BallType::from_tag("tango"), BallType::Classic);
        for ball in BallType::ALL {
            assert_eq!(BallType::from_tag(ball.as_str()), ball);
        }
    }

    #[test]
    fn test_ground_and_flying_bounds() {
        let cone = Obstacle::cone(100.0, false, false);
        let b = cone.bounds();
        assert_eq!(b.min, Vec2::new(100.0, GROUND_Y - CONE_HEIGHT));
        assert_eq!(b.max, Vec2::new(100.0 + CONE_WIDTH, GROUND_Y));

        let drone = Obstacle::drone(100.0, 400.0);
        let b = drone.bounds();
        assert_eq!(b.min.y, 400.0 - DRONE_HEIGHT / 2.0);
        assert_eq!(b.max.y, 400.0 + DRONE_HEIGHT / 2.0);
    }

    #[test]
    fn test_center_follows_anchor() {
        let cone = Obstacle::cone(100.0, false, false);
        assert_eq!(
            cone.center(),
            Vec2::new(100.0 + CONE_WIDTH / 2.0, GROUND_Y - CONE_HEIGHT / 2.0)
        );

        let bottle = Obstacle::bottle(100.0, 300.0);
        assert_eq!(bottle.center().y, 300.0);
        let b = bottle.bounds();
        assert_eq!(bottle.center(), (b.min + b.max) / 2.0);
    }

    #[test]
    fn test_knock_down_only_rivals() {
        let mut rival = Obstacle::rival(300.0, Team::France, 55.0, appearance(), 0);
        assert!(!rival.is_fallen());
        assert!(rival.knock_down());
        assert!(rival.is_fallen());
        assert_eq!(rival.height, RIVAL_FALLEN_HEIGHT);

        let mut bench = Obstacle::bench(300.0, false);
        assert!(!bench.knock_down());
        assert!(!bench.is_fallen());
    }

    #[test]
    fn test_fallen_rival_stops_running() {
        let mut rival = Obstacle::rival(300.0, Team::Brazil, 65.0, appearance(), 0);
        rival.knock_down();
        rival.advance(0.0, 1.0);
        assert!(matches!(
            rival.kind,
            ObstacleKind::Rival { run_frame: 0, .. }
        ));
    }

    #[test]
    fn test_free_ball_bounces_on_ground() {
        let mut ball = Ball::spawn(BallType::Classic);
        ball.vy = 1000.0;
        ball.advance(0.0, 0.1);
        assert_eq!(ball.pos.y, GROUND_Y - BALL_GROUND_CLEARANCE);
        assert_eq!(ball.vy, BALL_BOUNCE_VELOCITY);
    }

    #[test]
    fn test_obstacle_colors() {
        assert_eq!(Obstacle::cone(0.0, true, true).color(), COLOR_DARK_CONE);
        assert_eq!(Obstacle::cone(0.0, false, true).color(), COLOR_CONE_YELLOW);
        assert_eq!(Obstacle::goal(0.0).color(), COLOR_GOAL_POST);
        assert_eq!(Obstacle::bottle(0.0, 300.0).color(), COLOR_BOTTLE_GREEN);
    }
}
