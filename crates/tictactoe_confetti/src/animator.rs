//! The particle collection and its per-frame update.

use super::particle::{Particle, Viewport, is_expired, update_particle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, instrument, trace};

/// Result of a single animation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Particles remain after the step.
    Running {
        /// Particles still alive.
        live: usize,
        /// Particles removed by this step.
        expired: usize,
    },
    /// The collection is empty; the animation has nothing left to draw.
    Finished {
        /// Particles removed by this step.
        expired: usize,
    },
}

impl TickOutcome {
    /// True once nothing is left to animate.
    pub fn is_finished(&self) -> bool {
        matches!(self, TickOutcome::Finished { .. })
    }
}

/// Snapshot of the particles after one step, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Step number since the animator was created.
    pub index: u64,
    /// Particles to draw.
    pub particles: Vec<Particle>,
}

/// Owns the live particles and advances them one step at a time.
#[derive(Debug, Clone)]
pub struct ParticleAnimator<R = ChaCha8Rng> {
    particles: Vec<Particle>,
    viewport: Viewport,
    rng: R,
    ticks: u64,
}

impl ParticleAnimator<ChaCha8Rng> {
    /// Creates an animator, seeded for reproducible confetti when `seed` is set.
    #[instrument]
    pub fn new(viewport: Viewport, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(viewport, rng)
    }
}

impl<R: Rng> ParticleAnimator<R> {
    /// Creates an animator drawing randomness from `rng`.
    pub fn with_rng(viewport: Viewport, rng: R) -> Self {
        Self {
            particles: Vec::new(),
            viewport,
            rng,
            ticks: 0,
        }
    }

    /// Appends `n` freshly randomized particles.
    #[instrument(skip(self), fields(live = self.particles.len()))]
    pub fn spawn(&mut self, n: usize) {
        let viewport = self.viewport;
        let rng = &mut self.rng;
        self.particles
            .extend((0..n).map(|_| Particle::random(&mut *rng, viewport)));
        trace!(live = self.particles.len(), "Spawned particles");
    }

    /// Advances every particle one step and drops the expired ones.
    pub fn tick(&mut self) -> TickOutcome {
        let before = self.particles.len();
        let viewport = self.viewport;
        self.particles.retain_mut(|p| {
            update_particle(p);
            !is_expired(p, &viewport)
        });
        self.ticks += 1;

        let live = self.particles.len();
        let expired = before - live;
        trace!(tick = self.ticks, live, expired, "Animation step");
        if live == 0 {
            TickOutcome::Finished { expired }
        } else {
            TickOutcome::Running { live, expired }
        }
    }

    /// Removes every particle.
    #[instrument(skip(self), fields(live = self.particles.len()))]
    pub fn stop(&mut self) {
        if !self.particles.is_empty() {
            debug!("Clearing particles");
        }
        self.particles.clear();
    }

    /// Changes the surface size used for spawning and expiry.
    #[instrument(skip(self))]
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Lazy sequence of frames, one step each, ending when no particles remain.
    ///
    /// The iterator borrows the animator; once it ends, spawning more
    /// particles and calling `frames` again picks up where it left off.
    pub fn frames(&mut self) -> Frames<'_, R> {
        Frames { animator: self }
    }

    /// Live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when nothing is left to animate.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current surface size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Steps taken so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Iterator returned by [`ParticleAnimator::frames`].
#[derive(Debug)]
pub struct Frames<'a, R> {
    animator: &'a mut ParticleAnimator<R>,
}

impl<R: Rng> Iterator for Frames<'_, R> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.animator.is_empty() {
            return None;
        }
        self.animator.tick();
        Some(Frame {
            index: self.animator.ticks,
            particles: self.animator.particles.clone(),
        })
    }
}
