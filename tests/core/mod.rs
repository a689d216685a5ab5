//! Core module tests
//!
//! Tests for:
//! - Window construction, alignment and labels
//! - Window navigation and normalization
//! - Local time behavior across DST transitions
//! - Resampling onto windows
//! - Sensor frame decoding
//! - Settings and i18n

pub mod i18n_tests;
pub mod navigation_tests;
