//! Protocol constants
//!
//! Header bytes, command codes, fixed length fields and frame sizes used by the
//! DWIN DGUS register protocol, plus the host-side defaults for a serial session.

use std::time::Duration;

// ============================================================================
// Framing
// ============================================================================

/// Two-byte header that starts every frame in both directions.
pub const FRAME_HEADER: [u8; 2] = [0x5A, 0xA5];
/// Size of the fixed prefix (header + length byte) that precedes the command.
pub const FRAME_PREFIX_SIZE: usize = 3;

// ============================================================================
// Command Codes
// ============================================================================

/// Write one or more VP registers.
pub const CMD_WRITE_REGISTER: u8 = 0x82;
/// Read one or more VP registers.
pub const CMD_READ_REGISTER: u8 = 0x83;

// ============================================================================
// Length Fields
// ============================================================================

/// Length byte of a write-register request (cmd + addr + value).
pub const WRITE_REGISTER_LEN: u8 = 0x05;
/// Length byte of a read-register request (cmd + addr + count).
pub const READ_REGISTER_LEN: u8 = 0x04;
/// Register count requested by a read-register frame.
pub const READ_REGISTER_COUNT: u8 = 0x01;

// ============================================================================
// Sizes
// ============================================================================

/// Size of an encoded write-register request.
pub const WRITE_REQUEST_SIZE: usize = 8;
/// Size of an encoded read-register request.
pub const READ_REQUEST_SIZE: usize = 7;
/// Number of bytes read (and discarded) after a write-register request.
pub const WRITE_ACK_SIZE: usize = 6;
/// Number of bytes expected in reply to a read-register request.
pub const READ_RESPONSE_SIZE: usize = 9;

/// ACK sent by the display after a register write (`"OK"` in the payload).
pub const WRITE_ACK: [u8; WRITE_ACK_SIZE] = [0x5A, 0xA5, 0x03, 0x82, 0x4F, 0x4B];

// ============================================================================
// Session Defaults
// ============================================================================

/// Default serial baud rate of DGUS panels.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;
/// Default read deadline for one reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);
/// Default back-off between polls of an idle transport.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_micros(500);
