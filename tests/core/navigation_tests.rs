//! Tests for window navigation and normalization
//!
//! Tests cover:
//! - can_forward at and around the window end
//! - forward/rewind symmetry
//! - forward refusing to reach into the future
//! - normalize coordinates

use chrono::{DateTime, Locale, TimeDelta, Utc};
use ruuvi_monitor::{Clock, ManualClock, Preset};

use crate::common::{clock_at, utc};

#[test]
fn test_fresh_window_cannot_forward() {
    for preset in Preset::all() {
        let mut w = preset
            .window_with(24, Utc, clock_at(2024, 4, 1, 13, 45), Locale::en_US)
            .unwrap();
        let (s0, s1) = (w.start(), w.end());
        assert!(!w.can_forward());
        assert!(!w.forward());
        assert_eq!((w.start(), w.end()), (s0, s1));
    }
}

#[test]
fn test_rewind_then_forward_restores() {
    for preset in Preset::all() {
        let mut w = preset
            .window_with(10, Utc, clock_at(2024, 4, 1, 13, 45), Locale::en_US)
            .unwrap();
        let (s0, s1) = (w.start(), w.end());

        assert!(w.rewind());
        assert_eq!(w.end(), s0);
        assert_eq!(w.start(), s0 - (s1 - s0));
        assert!(w.can_forward());

        assert!(w.forward());
        assert_eq!((w.start(), w.end()), (s0, s1));
    }
}

#[test]
fn test_forward_then_rewind_restores() {
    let clock = ManualClock::new(utc(2024, 4, 1, 13, 45));
    let mut w = Preset::Hours24
        .window_with(24, Utc, &clock, Locale::en_US)
        .unwrap();
    let (s0, s1) = (w.start(), w.end());

    clock.advance(TimeDelta::days(3));
    assert!(w.can_forward());
    assert!(w.forward());
    assert_eq!(w.start(), s1);
    assert_eq!(w.end(), s1 + (s1 - s0));

    w.rewind();
    assert_eq!((w.start(), w.end()), (s0, s1));
}

#[test]
fn test_repeated_rewind_keeps_duration() {
    let mut w = Preset::Week
        .window_with(28, Utc, clock_at(2024, 4, 1, 13, 45), Locale::en_US)
        .unwrap();
    let duration = w.duration();
    let end = w.end();
    for n in 1..=5 {
        w.rewind();
        assert_eq!(w.duration(), duration);
        assert_eq!(w.end(), end - n * duration);
    }
    // walk back to the present, then stop
    let mut steps = 0;
    while w.forward() {
        steps += 1;
    }
    assert_eq!(steps, 5);
    assert_eq!(w.end(), end);
}

#[test]
fn test_can_forward_boundary_is_strict() {
    let clock = ManualClock::new(utc(2024, 4, 1, 13, 45));
    let w = Preset::Hours24
        .window_with(24, Utc, &clock, Locale::en_US)
        .unwrap();
    let end = DateTime::from_timestamp(w.end(), 0).unwrap();

    clock.set(end);
    assert!(!w.can_forward());

    clock.set(end + TimeDelta::milliseconds(500));
    assert!(clock.now_secs() > w.end() as f64);
    assert!(w.can_forward());
}

#[test]
fn test_forward_stops_at_present() {
    let clock = ManualClock::new(utc(2024, 4, 1, 13, 45));
    let mut w = Preset::Days3
        .window_with(8, Utc, &clock, Locale::en_US)
        .unwrap();
    let end = w.end();

    // half a window later the next window would still reach past now
    clock.advance(TimeDelta::hours(12));
    assert!(w.can_forward());
    assert!(w.forward());
    assert!(w.end() as f64 > clock.now_secs());
    assert!(!w.forward());
    assert_eq!(w.end(), end + w.duration());
}

// ============================================
// Normalize Tests
// ============================================

#[test]
fn test_normalize_bounds() {
    let w = Preset::Days3
        .window_with(8, Utc, clock_at(2024, 4, 1, 13, 45), Locale::en_US)
        .unwrap();
    assert_eq!(w.normalize(w.start() as f64), 0.0);
    assert_eq!(w.normalize(w.end() as f64), 1.0);
    let mid = (w.start() + w.end()) as f64 / 2.0;
    assert_eq!(w.normalize(mid), 0.5);
}

#[test]
fn test_normalize_does_not_clamp() {
    let w = Preset::Hours24
        .window_with(24, Utc, clock_at(2024, 4, 1, 13, 45), Locale::en_US)
        .unwrap();
    assert_eq!(w.normalize((w.start() - w.duration()) as f64), -1.0);
    assert_eq!(w.normalize((w.end() + w.duration()) as f64), 2.0);
    let inside = w.normalize(w.start() as f64 + 0.25);
    assert!(inside > 0.0 && inside < 1.0);
}

#[test]
fn test_normalize_follows_navigation() {
    let mut w = Preset::Hours24
        .window_with(24, Utc, clock_at(2024, 4, 1, 13, 45), Locale::en_US)
        .unwrap();
    let ts = w.start() as f64;
    w.rewind();
    assert_eq!(w.normalize(ts), 1.0);
}
