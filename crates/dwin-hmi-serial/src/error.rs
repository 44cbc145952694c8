//! Error types for opening serial ports.

use thiserror::Error;

/// Errors that can occur before a transport is handed to the client.
///
/// Once a port is open, faults travel as `std::io::Error` through the
/// transport trait.
#[derive(Debug, Error)]
pub enum SerialError {
    /// The port could not be opened.
    #[error("failed to open {port}: {source}")]
    Open {
        /// Port name that was requested.
        port: String,
        /// Underlying serialport error.
        #[source]
        source: serialport::Error,
    },

    /// Port enumeration failed.
    #[error("failed to list serial ports: {0}")]
    Enumerate(#[source] serialport::Error),

    /// The configured timeout is negative, not a number, or too large for a `Duration`.
    #[error("invalid timeout: {0} s")]
    InvalidTimeout(f64),

    /// The configuration did not name a port.
    #[error("no serial port configured")]
    MissingPort,
}

/// Result type alias for serial operations.
pub type SerialResult<T> = Result<T, SerialError>;
