//! Win celebration: a spawn timer feeding a self-terminating frame loop.

use super::animator::{ParticleAnimator, TickOutcome};
use super::particle::{Particle, Viewport};
use super::schedule::{CancelToken, Clock, PeriodicTimer};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Timing and volume of a celebration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelebrationConfig {
    /// Time between spawn bursts.
    pub spawn_interval: Duration,
    /// Particles added per burst.
    pub particles_per_spawn: usize,
    /// Time between animation steps (one display refresh).
    pub frame_interval: Duration,
    /// Seed for reproducible confetti.
    pub seed: Option<u64>,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            spawn_interval: Duration::from_millis(20),
            particles_per_spawn: 2,
            frame_interval: Duration::from_millis(16),
            seed: None,
        }
    }
}

/// What one [`Celebration::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollReport {
    /// Particles added by spawn bursts.
    pub spawned: usize,
    /// Animation steps taken (zero or one).
    pub frames: u32,
    /// Particles alive afterwards.
    pub live: usize,
}

impl PollReport {
    /// True when the visible confetti changed.
    pub fn needs_redraw(&self) -> bool {
        self.spawned > 0 || self.frames > 0
    }
}

/// Drives a [`ParticleAnimator`] from a [`Clock`].
///
/// Two activities share the animator: a spawn timer that adds a burst of
/// particles every `spawn_interval`, and a frame loop that steps the
/// animation at most once per `frame_interval`. The frame loop disarms itself
/// when the particle set empties and is re-armed by the next burst. Both stop
/// on [`Celebration::stop`] or when the [`CancelToken`] is cancelled.
#[derive(Debug)]
pub struct Celebration<C> {
    animator: ParticleAnimator,
    clock: C,
    config: CelebrationConfig,
    spawn_timer: PeriodicTimer,
    frame_timer: PeriodicTimer,
    token: CancelToken,
}

impl<C: Clock> Celebration<C> {
    /// Creates an idle celebration.
    #[instrument(skip(clock))]
    pub fn new(config: CelebrationConfig, viewport: Viewport, clock: C) -> Self {
        Self {
            animator: ParticleAnimator::new(viewport, config.seed),
            clock,
            config,
            spawn_timer: PeriodicTimer::new(config.spawn_interval),
            frame_timer: PeriodicTimer::new(config.frame_interval).with_max_catch_up(1),
            token: CancelToken::new(),
        }
    }

    /// Starts spawning and animating.
    ///
    /// Restarting after a stop hands out a fresh [`CancelToken`]. A run that
    /// was cancelled but not yet polled is cleared first.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        if self.token.is_cancelled() {
            self.stop();
            self.token = CancelToken::new();
        }
        let now = self.clock.now();
        self.spawn_timer.arm(now);
        self.frame_timer.arm_immediate(now);
        info!(
            spawn_ms = self.config.spawn_interval.as_millis() as u64,
            per_spawn = self.config.particles_per_spawn,
            "🎉 Celebration started"
        );
    }

    /// Cancels both activities and clears every particle. Safe to call repeatedly.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        if self.is_active() {
            info!(live = self.animator.len(), "Celebration stopped");
        }
        self.token.cancel();
        self.spawn_timer.disarm();
        self.frame_timer.disarm();
        self.animator.stop();
    }

    /// Stops adding particles; the ones in flight decay naturally.
    #[instrument(skip(self))]
    pub fn stop_spawning(&mut self) {
        debug!(live = self.animator.len(), "Spawning stopped");
        self.spawn_timer.disarm();
    }

    /// Runs whatever came due since the last poll.
    pub fn poll(&mut self) -> PollReport {
        if self.token.is_cancelled() {
            if self.is_active() {
                debug!("Cancellation requested");
                self.stop();
            }
            return PollReport::default();
        }

        let now = self.clock.now();
        let bursts = self.spawn_timer.poll(now) as usize;
        let spawned = bursts * self.config.particles_per_spawn;
        if spawned > 0 {
            self.animator.spawn(spawned);
            if !self.frame_timer.is_armed() {
                debug!("Frame loop resumed");
                self.frame_timer.arm_immediate(now);
            }
        }

        let frames = self.frame_timer.poll(now);
        if frames > 0
            && let TickOutcome::Finished { .. } = self.animator.tick()
        {
            debug!(tick = self.animator.ticks(), "Frame loop idle");
            self.frame_timer.disarm();
        }

        PollReport {
            spawned,
            frames,
            live: self.animator.len(),
        }
    }

    /// Updates the surface size.
    #[instrument(skip(self))]
    pub fn resize(&mut self, viewport: Viewport) {
        self.animator.resize(viewport);
    }

    /// Token that cancels the current run from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// True while a timer or frame step is pending.
    pub fn is_scheduled(&self) -> bool {
        self.spawn_timer.is_armed() || self.frame_timer.is_armed()
    }

    /// True while anything is scheduled or visible.
    pub fn is_active(&self) -> bool {
        self.is_scheduled() || !self.animator.is_empty()
    }

    /// True while bursts are still being added.
    pub fn is_spawning(&self) -> bool {
        self.spawn_timer.is_armed()
    }

    /// Time remaining until the next pending step, if any.
    pub fn until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        [self.spawn_timer.next_due(), self.frame_timer.next_due()]
            .into_iter()
            .flatten()
            .min()
            .map(|due| due.saturating_sub(now))
    }

    /// Particles to draw.
    pub fn particles(&self) -> &[Particle] {
        self.animator.particles()
    }

    /// Current surface size.
    pub fn viewport(&self) -> Viewport {
        self.animator.viewport()
    }

    /// Configuration in use.
    pub fn config(&self) -> &CelebrationConfig {
        &self.config
    }

    /// Animation steps taken so far.
    pub fn ticks(&self) -> u64 {
        self.animator.ticks()
    }
}
