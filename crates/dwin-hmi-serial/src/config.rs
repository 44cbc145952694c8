//! Serial port configuration.

use std::time::Duration;

use dwin_hmi_protocol::{DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};

use crate::error::{SerialError, SerialResult};

/// How to open the display's serial port.
///
/// Every field has a default, so a config file only needs to name the port:
///
/// ```yaml
/// port: /dev/ttyUSB0
/// baud_rate: 115200
/// timeout_secs: 0.1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Port name (e.g. `/dev/ttyUSB0` or `COM3`).
    pub port: String,
    /// Baud rate in bits per second.
    pub baud_rate: u32,
    /// Default reply deadline in (fractional) seconds.
    pub timeout_secs: f64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            port: String::new(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout_secs: DEFAULT_TIMEOUT.as_secs_f64(),
        }
    }
}

impl SerialConfig {
    /// Config for the given port with default baud rate and timeout.
    pub fn new(port: impl Into<String>) -> Self {
        SerialConfig {
            port: port.into(),
            ..Self::default()
        }
    }

    /// Set the baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the reply deadline in seconds.
    pub fn with_timeout_secs(mut self, timeout_secs: f64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// The reply deadline as a `Duration`.
    pub fn timeout(&self) -> SerialResult<Duration> {
        Duration::try_from_secs_f64(self.timeout_secs)
            .map_err(|_| SerialError::InvalidTimeout(self.timeout_secs))
    }

    /// Check the config can be used to open a port.
    pub fn validate(&self) -> SerialResult<()> {
        if self.port.is_empty() {
            return Err(SerialError::MissingPort);
        }
        self.timeout().map(|_| ())
    }
}
