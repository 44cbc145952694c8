//! Commands that can be sent to the display.

use crate::constants::*;
use crate::error::*;
use crate::frame::*;

/// Register commands understood by the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Write one 16-bit VP register.
    WriteRegister {
        /// VP address.
        address: u16,
        /// Value to store.
        value: u16,
    },

    /// Read one 16-bit VP register.
    ReadRegister {
        /// VP address.
        address: u16,
    },
}

impl Command {
    /// Get the command code.
    pub fn code(&self) -> u8 {
        match self {
            Command::WriteRegister { .. } => CMD_WRITE_REGISTER,
            Command::ReadRegister { .. } => CMD_READ_REGISTER,
        }
    }

    /// Short name used in logs and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            Command::WriteRegister { .. } => "write_register",
            Command::ReadRegister { .. } => "read_register",
        }
    }

    /// Number of reply bytes the host reads after sending this command.
    pub fn reply_len(&self) -> usize {
        match self {
            Command::WriteRegister { .. } => WRITE_ACK_SIZE,
            Command::ReadRegister { .. } => READ_RESPONSE_SIZE,
        }
    }

    /// Encode the command to a complete frame.
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            Command::WriteRegister { address, value } => {
                let [addr_hi, addr_lo] = address.to_be_bytes();
                let [val_hi, val_lo] = value.to_be_bytes();
                encode_frame(
                    WRITE_REGISTER_LEN,
                    CMD_WRITE_REGISTER,
                    &[addr_hi, addr_lo, val_hi, val_lo],
                )
            }
            Command::ReadRegister { address } => {
                let [addr_hi, addr_lo] = address.to_be_bytes();
                encode_frame(
                    READ_REGISTER_LEN,
                    CMD_READ_REGISTER,
                    &[addr_hi, addr_lo, READ_REGISTER_COUNT],
                )
            }
        }
    }

    /// Decode a request frame.
    ///
    /// Trailing bytes past the fixed frame size are ignored.
    pub fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        if data.len() < FRAME_PREFIX_SIZE + 1 {
            return Err(ProtocolError::FrameTooShort {
                expected: FRAME_PREFIX_SIZE + 1,
                actual: data.len(),
            });
        }
        if !has_header(data) {
            return Err(ProtocolError::BadHeader([data[0], data[1]]));
        }

        let len = data[2];
        let code = data[3];
        let (expected_len, size) = match code {
            CMD_WRITE_REGISTER => (WRITE_REGISTER_LEN, WRITE_REQUEST_SIZE),
            CMD_READ_REGISTER => (READ_REGISTER_LEN, READ_REQUEST_SIZE),
            other => return Err(ProtocolError::UnknownCommand(other)),
        };
        if len != expected_len {
            return Err(ProtocolError::LengthMismatch {
                command: code,
                expected: expected_len,
                actual: len,
            });
        }
        if data.len() < size {
            return Err(ProtocolError::FrameTooShort {
                expected: size,
                actual: data.len(),
            });
        }

        let address = u16::from_be_bytes([data[4], data[5]]);
        match code {
            CMD_WRITE_REGISTER => Ok(Command::WriteRegister {
                address,
                value: u16::from_be_bytes([data[6], data[7]]),
            }),
            _ => Ok(Command::ReadRegister { address }),
        }
    }
}
