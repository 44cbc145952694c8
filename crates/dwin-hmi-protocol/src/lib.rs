//! DWIN DGUS HMI Register Protocol
//!
//! This crate implements the host side of the register access protocol spoken by
//! DWIN DGUS HMI display controllers over a serial line. Every exchange is a
//! single request frame followed by a fixed-length reply read within a deadline.
//!
//! # Protocol Overview
//!
//! All frames share the same layout:
//!
//! ```text
//! +------+------+-----+-----+-------------------+
//! | 0x5A | 0xA5 | len | cmd | payload[0..len-1] |
//! +------+------+-----+-----+-------------------+
//! ```
//!
//! - **Write register** (`0x82`): `5A A5 05 82 AH AL VH VL`, answered by a 6-byte ACK
//!   that is read and discarded.
//! - **Read register** (`0x83`): `5A A5 04 83 AH AL 01`, answered by
//!   `5A A5 LEN 83 AH AL 01 VH VL`.
//!
//! 32-bit floats occupy two consecutive registers, most significant word first.
//!
//! # Example
//!
//! ```rust
//! use dwin_hmi_protocol::{HmiClient, MockTransport};
//!
//! let mut hmi = HmiClient::new(MockTransport::with_device());
//! hmi.write_register(0x07D0, 0x1234)?;
//! assert_eq!(hmi.read_register(0x07D0)?, 0x1234);
//!
//! hmi.write_float(0x0800, 3.1415)?;
//! assert_eq!(hmi.read_float(0x0800)?, 3.1415);
//! # Ok::<(), dwin_hmi_protocol::HmiError>(())
//! ```

mod client;
mod commands;
mod constants;
mod error;
mod frame;
mod mock;
mod responses;
mod transport;
mod words;

pub use client::*;
pub use commands::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use mock::*;
pub use responses::*;
pub use transport::*;
pub use words::*;
