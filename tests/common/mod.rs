//! Common test utilities shared across all test modules
//!
//! Fixed clocks, calendar helpers and canned sensor frames so every test
//! runs against a known "now" and a known time zone.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use ruuvi_monitor::resample::Measurement;
use ruuvi_monitor::sensor::log_protocol::{ADDR_ENV, OP_RESPONSE};
use ruuvi_monitor::FixedClock;

/// UTC instant from calendar fields, panicking on invalid input
pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, 0))
        .unwrap_or_else(|| panic!("Invalid date {}-{}-{} {}:{}", year, month, day, hour, min));
    Utc.from_utc_datetime(&naive)
}

/// Clock frozen at the given UTC calendar time
pub fn clock_at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> FixedClock {
    FixedClock(utc(year, month, day, hour, min))
}

/// Epoch seconds of the given UTC calendar time
pub fn epoch(year: i32, month: u32, day: u32, hour: u32, min: u32) -> i64 {
    utc(year, month, day, hour, min).timestamp()
}

/// One measurement every `every` seconds starting at `start`, value = index
pub fn ramp(start: i64, every: i64, count: usize) -> Vec<Measurement> {
    (0..count)
        .map(|i| Measurement::new(start + i as i64 * every, i as f64))
        .collect()
}

/// Log download notification for one record
pub fn log_record(src: u8, ts: u32, raw: i32) -> Vec<u8> {
    let mut frame = vec![ADDR_ENV, src, OP_RESPONSE];
    frame.extend_from_slice(&ts.to_be_bytes());
    frame.extend_from_slice(&raw.to_be_bytes());
    frame
}

/// Log download end marker
pub fn log_end() -> Vec<u8> {
    let mut frame = vec![ADDR_ENV, ADDR_ENV, OP_RESPONSE];
    frame.extend_from_slice(&u32::MAX.to_be_bytes());
    frame
}
