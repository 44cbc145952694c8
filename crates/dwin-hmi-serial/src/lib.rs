//! Serial-port transport for DWIN DGUS HMI displays.
//!
//! [`SerialTransport`] adapts a port opened through the `serialport` crate to
//! the protocol's [`ByteTransport`](dwin_hmi_protocol::ByteTransport) trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use dwin_hmi_protocol::HmiClient;
//! use dwin_hmi_serial::{SerialConfig, SerialTransport};
//!
//! let config = SerialConfig::new("/dev/ttyUSB0").with_timeout_secs(0.2);
//! let mut hmi = HmiClient::new(SerialTransport::open(&config)?);
//! hmi.write_register(0x5000, 0x0005)?;
//! ```

mod config;
mod error;
mod port;

pub use config::*;
pub use error::*;
pub use port::*;
