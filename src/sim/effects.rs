//! Particle effects: explosions, confetti and fireworks
//!
//! Purely visual; nothing in gameplay reads particle state.

use glam::Vec2;
use rand::Rng;

use super::entities::{Particle, ParticleKind};
use crate::consts::*;

/// Base colour plus lighter, darker and white variants
pub fn color_variations(base: u32) -> [u32; 4] {
    let r = ((base >> 16) & 0xff) as i32;
    let g = ((base >> 8) & 0xff) as i32;
    let b = (base & 0xff) as i32;
    let pack = |r: i32, g: i32, b: i32| ((r as u32) << 16) | ((g as u32) << 8) | b as u32;

    [
        base,
        pack((r + 40).min(255), (g + 40).min(255), (b + 40).min(255)),
        pack((r - 40).max(0), (g - 40).max(0), (b - 40).max(0)),
        0xffffff,
    ]
}

fn emit(particles: &mut Vec<Particle>, particle: Particle) {
    if particles.len() < MAX_PARTICLES {
        particles.push(particle);
    }
}

pub fn explosion(particles: &mut Vec<Particle>, rng: &mut impl Rng, pos: Vec2, base_color: u32) {
    let colors = color_variations(base_color);
    for _ in 0..EXPLOSION_PARTICLE_COUNT {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = rng.random_range(100.0f32..300.0);
        let life = rng.random_range(0.5f32..1.0);
        emit(
            particles,
            Particle {
                kind: ParticleKind::Explosion,
                pos,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 100.0),
                life,
                max_life: life,
                size: rng.random_range(3.0f32..7.0),
                color: colors[rng.random_range(0..colors.len())],
                rotation: 0.0,
            },
        );
    }
}

/// One burst drifting down from the crowd
pub fn confetti(particles: &mut Vec<Particle>, rng: &mut impl Rng) {
    for _ in 0..CONFETTI_PARTICLE_COUNT {
        let life = rng.random_range(4.0f32..6.0);
        emit(
            particles,
            Particle {
                kind: ParticleKind::Confetti,
                pos: Vec2::new(
                    rng.random::<f32>() * GAME_WIDTH,
                    CROWD_START_Y + rng.random::<f32>() * 120.0,
                ),
                vel: Vec2::new(0.0, 80.0),
                life,
                max_life: life,
                size: 4.0,
                color: CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())],
                rotation: rng.random::<f32>() * std::f32::consts::TAU,
            },
        );
    }
}

/// Three bursts across the sky
pub fn fireworks(particles: &mut Vec<Particle>, rng: &mut impl Rng) {
    for (x, y) in FIREWORK_ORIGINS {
        for _ in 0..FIREWORK_PARTICLE_COUNT {
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let speed = rng.random_range(100.0f32..250.0);
            let life = rng.random_range(1.5f32..2.0);
            emit(
                particles,
                Particle {
                    kind: ParticleKind::Firework,
                    pos: Vec2::new(x, y),
                    vel: Vec2::new(angle.cos() * speed, angle.sin() * speed),
                    life,
                    max_life: life,
                    size: rng.random_range(3.0f32..6.0),
                    color: FIREWORK_COLORS[rng.random_range(0..FIREWORK_COLORS.len())],
                    rotation: 0.0,
                },
            );
        }
    }
}

/// Move every particle and drop the dead ones
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.advance(dt);
    }
    particles.retain(Particle::is_alive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_color_variations_saturate() {
        let [base, light, dark, white] = color_variations(0xf0_10_80);
        assert_eq!(base, 0xf01080);
        assert_eq!(light, 0xff_38_a8);
        assert_eq!(dark, 0xc8_00_58);
        assert_eq!(white, 0xffffff);
    }

    #[test]
    fn test_explosion_uses_base_palette() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        explosion(&mut particles, &mut rng, Vec2::new(10.0, 20.0), COLOR_CONE_ORANGE);
        assert_eq!(particles.len(), EXPLOSION_PARTICLE_COUNT);
        let palette = color_variations(COLOR_CONE_ORANGE);
        assert!(particles.iter().all(|p| palette.contains(&p.color)));
        assert!(particles.iter().all(|p| p.kind == ParticleKind::Explosion));
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        fireworks(&mut particles, &mut rng);
        assert_eq!(particles.len(), 3 * FIREWORK_PARTICLE_COUNT);
        update(&mut particles, 1.0);
        update(&mut particles, 1.0);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        for _ in 0..200 {
            confetti(&mut particles, &mut rng);
        }
        assert_eq!(particles.len(), MAX_PARTICLES);
    }
}
