//! Ruuvi Monitor - time windows and sensor data handling for a Ruuvi tag monitor
//!
//! This library provides the pieces a monitor front end needs to plot tag
//! history: aligned time windows with tick labels, resampling of logged
//! measurements onto those windows, and decoding of the tag's wire formats.
//!
//! ## Module Structure
//!
//! - [`window`] - Time windows, presets and bucket labels
//! - [`clock`] - Injectable "now" providers
//! - [`resample`] - Measurement series, resampling and value limits
//! - [`sensor`] - Advertisement and log download decoding
//! - [`mod@i18n`] - Display language and chrono locale selection
//! - [`settings`] - User settings persistence

pub mod clock;
pub mod i18n;
pub mod resample;
pub mod sensor;
pub mod settings;
pub mod window;

pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use window::{LabelKind, Preset, TimeWindow, WindowError};
