//! RAWv2 advertisement decoding.

use serde::{Deserialize, Serialize};

use super::{require_len, SensorError};

/// Bluetooth SIG company identifier of Ruuvi Innovations
pub const RUUVI_MANUFACTURER_ID: u16 = 1177;

/// Data format byte of RAWv2 payloads
pub const FORMAT_RAW_V2: u8 = 0x05;

/// Format byte plus temperature, humidity and pressure
const READING_LEN: usize = 7;

/// Environment reading broadcast by a tag
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    /// Hectopascals
    pub pressure: f64,
}

impl Reading {
    /// Decode the manufacturer data published under [`RUUVI_MANUFACTURER_ID`].
    ///
    /// Fields after pressure (acceleration, battery, ...) are ignored.
    pub fn decode_advertisement(data: &[u8]) -> Result<Self, SensorError> {
        require_len(data, 1)?;
        if data[0] != FORMAT_RAW_V2 {
            return Err(SensorError::UnsupportedFormat(data[0]));
        }
        require_len(data, READING_LEN)?;

        let temperature = i16::from_be_bytes([data[1], data[2]]);
        let humidity = u16::from_be_bytes([data[3], data[4]]);
        let pressure = u16::from_be_bytes([data[5], data[6]]);

        let reading = Self {
            temperature: f64::from(temperature) * 0.005,
            humidity: f64::from(humidity) * 0.0025,
            pressure: (f64::from(pressure) + 50_000.0) * 0.01,
        };
        tracing::debug!(
            "Decoded reading T={:.3} H={:.3} P={:.2}",
            reading.temperature,
            reading.humidity,
            reading.pressure
        );
        Ok(reading)
    }
}
