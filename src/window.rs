//! Right-aligned time windows for the monitor's plots.
//!
//! A [`TimeWindow`] covers `[s0, s1)` in epoch seconds. It is split into
//! `count` buckets of `step` hours and its end is aligned to a boundary that
//! is a multiple of `2 × step` hours counted from local midnight. Windows are
//! built from one of the [`Preset`]s and navigated one whole window at a
//! time with [`TimeWindow::forward`] and [`TimeWindow::rewind`].
//!
//! "Now" comes from an injected [`Clock`]; "local" means the injected chrono
//! time zone, which is [`chrono::Local`] unless another zone is supplied.

use std::fmt;

use chrono::{DateTime, Datelike, Local, Locale, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use crate::i18n::Language;

/// Seconds per hour
pub const SECS_PER_HOUR: i64 = 3600;

/// Expected samples per second, shared by every preset (4.5 per hour)
pub const SAMPLE_FREQUENCY: f64 = 4.5 / 3600.0;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while building or labeling a window
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// Bucket count or step is zero, or their product overflows
    #[error("Invalid window arguments: count={count}, step={step_hours}h")]
    InvalidArgument { count: u32, step_hours: u32 },

    /// Timestamp chrono cannot represent
    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}

// ============================================================================
// Labels and presets
// ============================================================================

/// How bucket labels are rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelKind {
    /// Two-digit hour of day, "00" to "23"
    HourOfDay,
    /// Day of month without padding, "1" to "31"
    DayOfMonth,
    /// Localized abbreviated weekday name
    Weekday,
}

impl LabelKind {
    /// Render a label for one local instant
    pub fn format<Tz>(&self, at: &DateTime<Tz>, locale: Locale) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            LabelKind::HourOfDay => format!("{:02}", at.hour()),
            LabelKind::DayOfMonth => at.day().to_string(),
            LabelKind::Weekday => at.format_localized("%a", locale).to_string(),
        }
    }
}

/// Named window configurations
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    EnumIter,
    EnumString,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// One-hour buckets, hour labels
    #[default]
    Hours24,
    /// Three-hour buckets, hour labels
    Days3,
    /// Six-hour buckets, hour labels
    Week,
    /// Twelve-hour buckets, weekday labels
    Week2,
    /// One-day buckets, day-of-month labels
    Month,
}

impl Preset {
    /// Hours per bucket
    pub fn step_hours(&self) -> u32 {
        match self {
            Preset::Hours24 => 1,
            Preset::Days3 => 3,
            Preset::Week => 6,
            Preset::Week2 => 12,
            Preset::Month => 24,
        }
    }

    pub fn label_kind(&self) -> LabelKind {
        match self {
            Preset::Hours24 | Preset::Days3 | Preset::Week => LabelKind::HourOfDay,
            Preset::Week2 => LabelKind::Weekday,
            Preset::Month => LabelKind::DayOfMonth,
        }
    }

    /// Get all presets, shortest first
    pub fn all() -> Vec<Preset> {
        Preset::iter().collect()
    }

    /// Build a window from the system clock in the local time zone, labeled
    /// in the runtime locale
    pub fn window(self, count: u32) -> Result<TimeWindow, WindowError> {
        self.window_with(count, Local, SystemClock, Language::from_env().locale())
    }

    /// Build a window with explicit time zone, clock and locale
    pub fn window_with<Tz: TimeZone, C: Clock>(
        self,
        count: u32,
        tz: Tz,
        clock: C,
        locale: Locale,
    ) -> Result<TimeWindow<Tz, C>, WindowError> {
        TimeWindow::new(count, self.step_hours(), self.label_kind(), tz, clock, locale)
    }
}

// ============================================================================
// TimeWindow
// ============================================================================

/// A fixed-length, right-aligned span `[s0, s1)` of epoch seconds.
///
/// Only `s0` and `s1` change after construction, and always together, so the
/// duration never changes. A window is a plain value; it is not `Sync` when
/// built on a [`crate::clock::ManualClock`] and callers sharing one across
/// threads must synchronize it themselves.
#[derive(Clone, Debug)]
pub struct TimeWindow<Tz: TimeZone = Local, C = SystemClock> {
    s0: i64,
    s1: i64,
    double_step: i64,
    sample_frequency: f64,
    label_kind: LabelKind,
    tz: Tz,
    clock: C,
    locale: Locale,
}

impl TimeWindow {
    pub fn hours24(count: u32) -> Result<Self, WindowError> {
        Preset::Hours24.window(count)
    }

    pub fn days3(count: u32) -> Result<Self, WindowError> {
        Preset::Days3.window(count)
    }

    pub fn week(count: u32) -> Result<Self, WindowError> {
        Preset::Week.window(count)
    }

    pub fn week2(count: u32) -> Result<Self, WindowError> {
        Preset::Week2.window(count)
    }

    pub fn month(count: u32) -> Result<Self, WindowError> {
        Preset::Month.window(count)
    }
}

impl<Tz: TimeZone, C: Clock> TimeWindow<Tz, C> {
    /// Build a window of `count` buckets, `step_hours` each, ending on the
    /// next `2 × step_hours` boundary of local time at or after the current hour.
    pub fn new(
        count: u32,
        step_hours: u32,
        label_kind: LabelKind,
        tz: Tz,
        clock: C,
        locale: Locale,
    ) -> Result<Self, WindowError> {
        let invalid = || WindowError::InvalidArgument { count, step_hours };
        if count == 0 || step_hours == 0 {
            return Err(invalid());
        }

        let step = i64::from(step_hours);
        let double_hours = step.checked_mul(2).ok_or_else(invalid)?;
        let span = i64::from(count)
            .checked_mul(step)
            .and_then(|hours| hours.checked_mul(SECS_PER_HOUR))
            .ok_or_else(invalid)?;
        let double_step = double_hours
            .checked_mul(SECS_PER_HOUR)
            .ok_or_else(invalid)?;

        let now = clock.now();
        let hour = i64::from(now.with_timezone(&tz).hour()) % double_hours;

        let s1 = (now.timestamp().div_euclid(SECS_PER_HOUR) + double_hours - hour)
            .checked_mul(SECS_PER_HOUR)
            .ok_or_else(invalid)?;
        let s0 = s1.checked_sub(span).ok_or_else(invalid)?;

        tracing::debug!(
            "Built {}-bucket window of {}h steps: [{}, {}) at now={}",
            count,
            step_hours,
            s0,
            s1,
            now.timestamp()
        );

        Ok(Self {
            s0,
            s1,
            double_step,
            sample_frequency: SAMPLE_FREQUENCY,
            label_kind,
            tz,
            clock,
            locale,
        })
    }

    /// Inclusive start, epoch seconds
    pub fn start(&self) -> i64 {
        self.s0
    }

    /// Exclusive end, epoch seconds
    pub fn end(&self) -> i64 {
        self.s1
    }

    /// Alignment period in seconds, `2 × step` hours
    pub fn double_step(&self) -> i64 {
        self.double_step
    }

    pub fn sample_frequency(&self) -> f64 {
        self.sample_frequency
    }

    pub fn label_kind(&self) -> LabelKind {
        self.label_kind
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    /// Window length in seconds
    pub fn duration(&self) -> i64 {
        self.s1 - self.s0
    }

    /// Number of plot samples for the window at the shared sampling cadence
    pub fn sample_count(&self) -> usize {
        (self.duration() as f64 * self.sample_frequency).round() as usize
    }

    /// Whether `ts` falls inside `[s0, s1)`
    pub fn contains(&self, ts: f64) -> bool {
        ts >= self.s0 as f64 && ts < self.s1 as f64
    }

    /// True while the whole window lies in the past
    pub fn can_forward(&self) -> bool {
        (self.s1 as f64) < self.clock.now_secs()
    }

    /// Move one window later. Refuses (returns false) once the window would
    /// reach past "now".
    pub fn forward(&mut self) -> bool {
        if !self.can_forward() {
            tracing::debug!("Window [{}, {}) is current, not moving forward", self.s0, self.s1);
            return false;
        }
        let moved = self.shift(self.duration());
        if moved {
            tracing::debug!("Moved window forward to [{}, {})", self.s0, self.s1);
        }
        moved
    }

    /// Move one window earlier. Returns false, leaving the window in place,
    /// when the earlier window is not representable.
    pub fn rewind(&mut self) -> bool {
        let moved = self.shift(-self.duration());
        if moved {
            tracing::debug!("Rewound window to [{}, {})", self.s0, self.s1);
        }
        moved
    }

    fn shift(&mut self, delta: i64) -> bool {
        match (self.s0.checked_add(delta), self.s1.checked_add(delta)) {
            (Some(s0), Some(s1)) => {
                self.s0 = s0;
                self.s1 = s1;
                true
            }
            _ => {
                tracing::warn!(
                    "Cannot shift window [{}, {}) by {}s, out of range",
                    self.s0,
                    self.s1,
                    delta
                );
                false
            }
        }
    }

    /// Position of `ts` in window coordinates; `[0, 1)` is inside, no clamping
    pub fn normalize(&self, ts: f64) -> f64 {
        (ts - self.s0 as f64) / self.duration() as f64
    }

    fn local_time(&self, ts: i64) -> Result<DateTime<Tz>, WindowError> {
        DateTime::from_timestamp(ts, 0)
            .map(|utc| utc.with_timezone(&self.tz))
            .ok_or(WindowError::TimestampOutOfRange(ts))
    }
}

impl<Tz, C> TimeWindow<Tz, C>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    C: Clock,
{
    /// Label for tick `i`, placed at `s0 + i × double_step`
    pub fn label(&self, i: usize) -> Result<String, WindowError> {
        let offset = i64::try_from(i)
            .unwrap_or(i64::MAX)
            .saturating_mul(self.double_step);
        let ts = self.s0.saturating_add(offset);
        let at = self.local_time(ts)?;
        Ok(self.label_kind.format(&at, self.locale))
    }

    /// One label per `double_step` tick inside the window
    pub fn labels(&self) -> Result<Vec<String>, WindowError> {
        let ticks = (self.duration() + self.double_step - 1) / self.double_step;
        (0..ticks as usize).map(|i| self.label(i)).collect()
    }

    /// Local date of the last second inside the window, `yyyy-MM-dd`
    pub fn end_date(&self) -> Result<String, WindowError> {
        let last = self.local_time(self.s1 - 1)?;
        Ok(last.format_localized("%Y-%m-%d", self.locale).to_string())
    }
}
