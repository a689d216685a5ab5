//! History download over the Nordic UART service (NUS).
//!
//! The host writes a [`LogRequest`] to the TX characteristic; the tag answers
//! with one notification per stored value on RX and finishes with an end
//! marker. All integers are big-endian.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{require_len, SensorError};
use crate::resample::{Measurement, Series};
use crate::window::SECS_PER_HOUR;

/// NUS service UUID
pub const NUS_SERVICE_UUID: &str = "6E400001-B5A3-F393-E0A9-E50E24DCCA9E";
/// Host to tag
pub const NUS_TX_UUID: &str = "6E400002-B5A3-F393-E0A9-E50E24DCCA9E";
/// Tag to host
pub const NUS_RX_UUID: &str = "6E400003-B5A3-F393-E0A9-E50E24DCCA9E";

/// Whole environment sensor
pub const ADDR_ENV: u8 = 0x3a;
pub const ADDR_TEMPERATURE: u8 = 0x30;
pub const ADDR_HUMIDITY: u8 = 0x31;
pub const ADDR_PRESSURE: u8 = 0x32;

pub const OP_REQUEST: u8 = 0x11;
pub const OP_RESPONSE: u8 = 0x10;

/// dst, src, op, timestamp
const HEADER_LEN: usize = 7;
/// header plus value
const RECORD_LEN: usize = 11;

/// Quantity a log record measures
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Temperature,
    Humidity,
    Pressure,
}

impl Quantity {
    pub fn from_address(addr: u8) -> Option<Self> {
        match addr {
            ADDR_TEMPERATURE => Some(Quantity::Temperature),
            ADDR_HUMIDITY => Some(Quantity::Humidity),
            ADDR_PRESSURE => Some(Quantity::Pressure),
            _ => None,
        }
    }

    pub fn address(&self) -> u8 {
        match self {
            Quantity::Temperature => ADDR_TEMPERATURE,
            Quantity::Humidity => ADDR_HUMIDITY,
            Quantity::Pressure => ADDR_PRESSURE,
        }
    }

    /// Storage table the quantity belongs to
    pub fn table_name(&self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature",
            Quantity::Humidity => "humidity",
            Quantity::Pressure => "pressure",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::Temperature => "°C",
            Quantity::Humidity => "%",
            Quantity::Pressure => "hPa",
        }
    }

    pub fn all() -> &'static [Quantity] {
        &[Quantity::Temperature, Quantity::Humidity, Quantity::Pressure]
    }
}

/// Request for all values logged between `since` and `now`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogRequest {
    /// Epoch seconds
    pub now: u32,
    /// Epoch seconds
    pub since: u32,
}

impl LogRequest {
    /// Request everything newer than `latest`, overlapping it by one hour
    pub fn since_latest(now: u32, latest: u32) -> Self {
        Self {
            now,
            since: latest.saturating_sub(SECS_PER_HOUR as u32),
        }
    }

    pub fn encode(&self) -> [u8; 11] {
        let mut frame = [0u8; 11];
        frame[..3].copy_from_slice(&[ADDR_ENV, ADDR_ENV, OP_REQUEST]);
        frame[3..7].copy_from_slice(&self.now.to_be_bytes());
        frame[7..].copy_from_slice(&self.since.to_be_bytes());
        frame
    }
}

/// One decoded RX notification
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogFrame {
    Record {
        quantity: Quantity,
        measurement: Measurement,
    },
    /// Tag has sent everything
    End,
}

impl LogFrame {
    /// Decode a notification. Frames addressed elsewhere or carrying another
    /// operation are not ours and yield `Ok(None)`.
    pub fn decode(data: &[u8]) -> Result<Option<Self>, SensorError> {
        require_len(data, 3)?;
        let (dst, src, op) = (data[0], data[1], data[2]);
        if dst != ADDR_ENV || op != OP_RESPONSE {
            return Ok(None);
        }

        require_len(data, HEADER_LEN)?;
        let ts = u32::from_be_bytes([data[3], data[4], data[5], data[6]]);
        if src == ADDR_ENV && ts == u32::MAX {
            return Ok(Some(LogFrame::End));
        }

        let quantity = Quantity::from_address(src).ok_or(SensorError::UnknownSource(src))?;
        require_len(data, RECORD_LEN)?;
        let raw = i32::from_be_bytes([data[7], data[8], data[9], data[10]]);

        Ok(Some(LogFrame::Record {
            quantity,
            measurement: Measurement::new(i64::from(ts), f64::from(raw) / 100.0),
        }))
    }
}

/// Gathers a download into one series per quantity
#[derive(Clone, Debug, Default)]
pub struct LogCollector {
    records: BTreeMap<Quantity, Vec<Measurement>>,
    finished: bool,
}

impl LogCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one RX notification. Returns true once the end marker was seen.
    pub fn push(&mut self, data: &[u8]) -> Result<bool, SensorError> {
        match LogFrame::decode(data)? {
            Some(LogFrame::Record {
                quantity,
                measurement,
            }) => {
                self.records.entry(quantity).or_default().push(measurement);
            }
            Some(LogFrame::End) => {
                let total: usize = self.records.values().map(Vec::len).sum();
                tracing::info!("Finished reading log, {} records", total);
                self.finished = true;
            }
            None => {}
        }
        Ok(self.finished)
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Sorted series per quantity
    pub fn into_series(self) -> BTreeMap<Quantity, Series> {
        self.records
            .into_iter()
            .map(|(quantity, values)| (quantity, Series::new(values)))
            .collect()
    }
}
