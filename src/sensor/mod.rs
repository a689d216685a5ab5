//! Ruuvi tag wire formats.
//!
//! - [`advertisement`] - Broadcast manufacturer data (RAWv2 readings)
//! - [`log_protocol`] - History download frames over the Nordic UART service

pub mod advertisement;
pub mod log_protocol;

pub use advertisement::{Reading, RUUVI_MANUFACTURER_ID};
pub use log_protocol::{LogCollector, LogFrame, LogRequest, Quantity};

use thiserror::Error;

/// Errors that can occur while decoding sensor payloads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// Payload shorter than the format requires
    #[error("Truncated payload: needed {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    /// Advertisement data format other than RAWv2
    #[error("Unsupported data format: {0:#04x}")]
    UnsupportedFormat(u8),

    /// Log record from an unknown sensor address
    #[error("Unknown measurement source: {0:#04x}")]
    UnknownSource(u8),
}

/// Fail with [`SensorError::Truncated`] unless `data` holds `needed` bytes
pub(crate) fn require_len(data: &[u8], needed: usize) -> Result<(), SensorError> {
    if data.len() < needed {
        return Err(SensorError::Truncated {
            needed,
            got: data.len(),
        });
    }
    Ok(())
}
