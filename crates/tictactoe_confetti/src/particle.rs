//! Confetti particles: a plain record plus free update/expiry functions.

use super::palette::ConfettiColor;
use derive_new::new;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::EnumCount;

/// Vertical spawn position, just above the top edge.
pub const SPAWN_Y: f32 = -10.0;
/// Smallest spawned size.
pub const MIN_SPAWN_SIZE: f32 = 5.0;
/// Largest spawned size (exclusive).
pub const MAX_SPAWN_SIZE: f32 = 15.0;
/// Size lost on every tick.
pub const SIZE_DECAY: f32 = 0.05;
/// Particles at or below this size are removed.
pub const EXPIRY_SIZE: f32 = 0.2;

/// Dimensions of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, new)]
pub struct Viewport {
    /// Surface width.
    pub width: f32,
    /// Surface height. Particles falling past it expire.
    pub height: f32,
}

/// A single falling, spinning, shrinking square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Horizontal center.
    pub x: f32,
    /// Vertical center, growing downward.
    pub y: f32,
    /// Edge length.
    pub size: f32,
    /// Fill color.
    pub color: ConfettiColor,
    /// Horizontal velocity per tick.
    pub speed_x: f32,
    /// Vertical velocity per tick.
    pub speed_y: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Rotation change per tick, in degrees.
    pub rotation_speed: f32,
}

impl Particle {
    /// Spawns a particle above the viewport with randomized parameters.
    pub fn random<R: Rng>(rng: &mut R, viewport: Viewport) -> Self {
        let x = if viewport.width > 0.0 {
            rng.gen_range(0.0..viewport.width)
        } else {
            0.0
        };
        Self {
            x,
            y: SPAWN_Y,
            size: rng.gen_range(MIN_SPAWN_SIZE..MAX_SPAWN_SIZE),
            color: ConfettiColor::nth(rng.gen_range(0..ConfettiColor::COUNT)),
            speed_x: rng.gen_range(-1.5..1.5),
            speed_y: rng.gen_range(2.0..5.0),
            rotation: rng.gen_range(0.0..360.0),
            rotation_speed: rng.gen_range(-5.0..5.0),
        }
    }

    /// Corners of the rotated square, clockwise from the top-left.
    pub fn corners(&self) -> [(f32, f32); 4] {
        let half = self.size.max(0.0) / 2.0;
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        [(-half, -half), (half, -half), (half, half), (-half, half)].map(|(dx, dy)| {
            (
                self.x + dx * cos - dy * sin,
                self.y + dx * sin + dy * cos,
            )
        })
    }
}

/// Advances one tick: move, spin and shrink.
pub fn update_particle(particle: &mut Particle) {
    particle.x += particle.speed_x;
    particle.y += particle.speed_y;
    particle.rotation += particle.rotation_speed;
    particle.size -= SIZE_DECAY;
}

/// True once the particle has shrunk away or fallen below the viewport.
pub fn is_expired(particle: &Particle, viewport: &Viewport) -> bool {
    particle.size <= EXPIRY_SIZE || particle.y > viewport.height
}

/// Upper bound on the ticks any spawned particle survives.
pub fn max_lifetime_ticks() -> usize {
    ((MAX_SPAWN_SIZE - EXPIRY_SIZE) / SIZE_DECAY).ceil() as usize + 1
}
