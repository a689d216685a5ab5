//! Measurement series and plot resampling.
//!
//! Sensor logs arrive as irregular `(timestamp, value)` pairs. Plots want a
//! fixed number of evenly spaced samples across a [`TimeWindow`], with holes
//! where the sensor was silent. [`Series::resample`] produces exactly that.

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::window::{TimeWindow, SECS_PER_HOUR};

/// Samples further apart than this are not interpolated across (5 hours)
pub const LARGE_GAP_SECS: f64 = 5.0 * 3600.0;

/// Extra history considered on both sides of a resampled range
pub const QUERY_MARGIN_SECS: i64 = SECS_PER_HOUR;

/// A single sensor value
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Epoch seconds
    pub ts: i64,
    pub value: f64,
}

impl Measurement {
    pub fn new(ts: i64, value: f64) -> Self {
        Self { ts, value }
    }
}

/// Smallest and largest value in a range
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

/// Measurements of one quantity, kept sorted by timestamp
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    measurements: Vec<Measurement>,
}

impl Series {
    /// Build a series; input order does not matter
    pub fn new(mut measurements: Vec<Measurement>) -> Self {
        measurements.sort_by_key(|m| m.ts);
        Self { measurements }
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Timestamp of the newest measurement
    pub fn latest_timestamp(&self) -> Option<i64> {
        self.measurements.last().map(|m| m.ts)
    }

    /// Append measurements that are not older than the newest one already held.
    ///
    /// Returns how many were appended.
    pub fn append_newer(&mut self, incoming: impl IntoIterator<Item = Measurement>) -> usize {
        let mut incoming: Vec<Measurement> = incoming.into_iter().collect();
        incoming.sort_by_key(|m| m.ts);

        let total = incoming.len();
        if let Some(latest) = self.latest_timestamp() {
            incoming.retain(|m| m.ts >= latest);
        }
        let dropped = total - incoming.len();
        if dropped > 0 {
            tracing::warn!("Dropped {} measurements older than the series head", dropped);
        }

        let appended = incoming.len();
        self.measurements.extend(incoming);
        appended
    }

    /// Measurements with `start <= ts <= end`
    fn range(&self, start: i64, end: i64) -> &[Measurement] {
        let lo = self.measurements.partition_point(|m| m.ts < start);
        let hi = self.measurements.partition_point(|m| m.ts <= end);
        &self.measurements[lo..hi.max(lo)]
    }

    /// Resample onto `samples` points at `start + k·(end − start)/samples`.
    ///
    /// Points before the first or after the last measurement, or inside a gap
    /// wider than [`LARGE_GAP_SECS`], are NaN. Everything else is linearly
    /// interpolated between the two bracketing measurements.
    pub fn resample(&self, start: i64, end: i64, samples: usize) -> Vec<f64> {
        if samples == 0 {
            return Vec::new();
        }
        if end <= start {
            return vec![f64::NAN; samples];
        }

        let points = self.range(
            start.saturating_sub(QUERY_MARGIN_SECS),
            end.saturating_add(QUERY_MARGIN_SECS),
        );
        let span = (end - start) as f64;
        let mut out = Vec::with_capacity(samples);

        // index of the first measurement strictly after the sample instant
        let mut next = 0;
        for k in 0..samples {
            let s = start as f64 + k as f64 * span / samples as f64;
            while next < points.len() && points[next].ts as f64 <= s {
                next += 1;
            }
            if next == 0 || next >= points.len() {
                out.push(f64::NAN);
                continue;
            }

            let before = points[next - 1];
            let after = points[next];
            let (t0, t1) = (before.ts as f64, after.ts as f64);
            let gap = t1 - t0;
            if gap > LARGE_GAP_SECS {
                out.push(f64::NAN);
            } else {
                out.push((s - t0) / gap * after.value + (t1 - s) / gap * before.value);
            }
        }
        out
    }

    /// Resample across a whole window at its sampling cadence
    pub fn resample_window<Tz: TimeZone, C: Clock>(&self, window: &TimeWindow<Tz, C>) -> Vec<f64> {
        self.resample(window.start(), window.end(), window.sample_count())
    }

    /// Value limits for measurements with `start <= ts <= end`
    pub fn limits(&self, start: i64, end: i64) -> Option<Limits> {
        self.range(start, end).iter().fold(None, |acc, m| {
            Some(match acc {
                None => Limits {
                    min: m.value,
                    max: m.value,
                },
                Some(l) => Limits {
                    min: l.min.min(m.value),
                    max: l.max.max(m.value),
                },
            })
        })
    }
}

impl FromIterator<Measurement> for Series {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
