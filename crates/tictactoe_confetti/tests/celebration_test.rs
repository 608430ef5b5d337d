//! Tests for celebration scheduling under a manual clock.

use std::time::Duration;
use tictactoe_confetti::{
    Celebration, CelebrationConfig, ManualClock, Viewport, max_lifetime_ticks,
};

const FRAME: Duration = Duration::from_millis(16);

fn celebration() -> (Celebration<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let config = CelebrationConfig {
        seed: Some(2024),
        ..CelebrationConfig::default()
    };
    let party = Celebration::new(config, Viewport::new(1024.0, 768.0), clock.clone());
    (party, clock)
}

#[test]
fn test_idle_until_started() {
    let (mut party, clock) = celebration();
    clock.advance(Duration::from_secs(1));
    assert_eq!(party.poll().spawned, 0);
    assert!(!party.is_scheduled());
    assert!(party.particles().is_empty());
}

#[test]
fn test_two_particles_every_twenty_millis() {
    let (mut party, clock) = celebration();
    party.start();

    let mut spawned = 0;
    for _ in 0..5 {
        clock.advance(Duration::from_millis(20));
        spawned += party.poll().spawned;
    }
    assert_eq!(spawned, 10);
}

#[test]
fn test_one_animation_step_per_poll() {
    let (mut party, clock) = celebration();
    party.start();
    clock.advance(Duration::from_millis(20));
    party.poll();

    // A long stall still only yields a single step.
    clock.advance(Duration::from_millis(500));
    let report = party.poll();
    assert_eq!(report.frames, 1);
}

#[test]
fn test_frame_loop_idles_when_empty_and_resumes_on_spawn() {
    let (mut party, clock) = celebration();
    party.start();

    let first = party.poll();
    assert_eq!(first.frames, 1);
    assert_eq!(first.live, 0);
    assert!(party.is_spawning());

    clock.advance(Duration::from_millis(20));
    let report = party.poll();
    assert_eq!(report.spawned, 2);
    assert_eq!(report.frames, 1);
    assert_eq!(report.live, 2);
}

#[test]
fn test_stop_is_idempotent_and_clears_everything() {
    let (mut party, clock) = celebration();
    party.start();
    for _ in 0..10 {
        clock.advance(FRAME);
        party.poll();
    }
    assert!(!party.particles().is_empty());

    party.stop();
    party.stop();
    assert!(party.particles().is_empty());
    assert!(!party.is_scheduled());
    assert!(!party.is_active());
    assert_eq!(party.until_next(), None);

    clock.advance(Duration::from_secs(5));
    let report = party.poll();
    assert!(!report.needs_redraw());
    assert!(party.particles().is_empty());
}

#[test]
fn test_external_cancel_stops_on_next_poll() {
    let (mut party, clock) = celebration();
    party.start();
    clock.advance(Duration::from_millis(40));
    party.poll();
    assert!(party.is_active());

    party.cancel_token().cancel();
    clock.advance(FRAME);
    party.poll();

    assert!(!party.is_active());
    assert!(party.particles().is_empty());
}

#[test]
fn test_restart_after_stop() {
    let (mut party, clock) = celebration();
    party.start();
    let old_token = party.cancel_token();
    party.stop();
    assert!(old_token.is_cancelled());

    party.start();
    assert!(!party.cancel_token().is_cancelled());
    clock.advance(Duration::from_millis(20));
    assert_eq!(party.poll().spawned, 2);
}

#[test]
fn test_start_after_unpolled_cancel_discards_old_particles() {
    let (mut party, clock) = celebration();
    party.start();
    clock.advance(Duration::from_millis(40));
    party.poll();
    assert_eq!(party.particles().len(), 4);

    party.cancel_token().cancel();
    party.start();
    assert!(party.particles().is_empty());
    assert!(!party.cancel_token().is_cancelled());

    clock.advance(Duration::from_millis(20));
    assert_eq!(party.poll().spawned, 2);
    assert_eq!(party.particles().len(), 2);
}

#[test]
fn test_particles_drain_after_spawning_stops() {
    let (mut party, clock) = celebration();
    party.start();
    for _ in 0..60 {
        clock.advance(Duration::from_millis(5));
        party.poll();
    }
    party.stop_spawning();
    assert!(!party.particles().is_empty());

    let mut last = party.particles().len();
    let mut frames = 0;
    while party.is_active() {
        clock.advance(FRAME);
        let report = party.poll();
        assert_eq!(report.spawned, 0);
        assert!(report.live <= last, "count grew from {last} to {}", report.live);
        last = report.live;
        frames += report.frames as usize;
        assert!(frames <= max_lifetime_ticks(), "animation did not terminate");
    }
    assert!(party.particles().is_empty());
    assert!(!party.is_scheduled());
}

#[test]
fn test_until_next_reports_nearest_deadline() {
    let (mut party, clock) = celebration();
    party.start();
    assert_eq!(party.until_next(), Some(Duration::ZERO));
    party.poll();
    assert_eq!(party.until_next(), Some(Duration::from_millis(20)));
    clock.advance(Duration::from_millis(5));
    assert_eq!(party.until_next(), Some(Duration::from_millis(15)));
}

#[test]
fn test_resize_applies_to_new_bursts() {
    let (mut party, clock) = celebration();
    party.resize(Viewport::new(10.0, 768.0));
    party.start();
    clock.advance(Duration::from_millis(20));
    party.poll();
    assert!(party.particles().iter().all(|p| p.x < 12.0));
    assert_eq!(party.viewport(), Viewport::new(10.0, 768.0));
}
