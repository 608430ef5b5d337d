//! Confetti for the end of a game.
//!
//! - [`Particle`] is a plain record advanced by [`update_particle`] and
//!   retired by [`is_expired`]
//! - [`ParticleAnimator`] owns the particle set and steps it
//! - [`Celebration`] schedules spawn bursts and animation steps from an
//!   injectable [`Clock`], so the whole effect runs under a [`ManualClock`]
//!   in tests
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tictactoe_confetti::{Celebration, CelebrationConfig, ManualClock, Viewport};
//!
//! let clock = ManualClock::new();
//! let mut party = Celebration::new(
//!     CelebrationConfig::default(),
//!     Viewport::new(800.0, 600.0),
//!     clock.clone(),
//! );
//! party.start();
//! clock.advance(Duration::from_millis(20));
//! assert_eq!(party.poll().spawned, 2);
//! party.stop();
//! assert!(!party.is_scheduled());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod animator;
mod celebration;
mod palette;
mod particle;
mod schedule;

pub use animator::{Frame, Frames, ParticleAnimator, TickOutcome};
pub use celebration::{Celebration, CelebrationConfig, PollReport};
pub use palette::ConfettiColor;
pub use particle::{
    EXPIRY_SIZE, MAX_SPAWN_SIZE, MIN_SPAWN_SIZE, Particle, SIZE_DECAY, SPAWN_Y, Viewport,
    is_expired, max_lifetime_ticks, update_particle,
};
pub use schedule::{CancelToken, Clock, ManualClock, PeriodicTimer, SystemClock};
