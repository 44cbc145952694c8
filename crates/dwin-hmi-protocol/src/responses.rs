//! Replies received from the display.

use crate::constants::*;
use crate::error::*;
use crate::frame::*;

/// Reply to a single-register read.
///
/// ```text
/// 5A A5 LEN 83 AH AL 01 VH VL
/// ```
///
/// Only the size, header and command echo are checked. The length byte,
/// address echo and register count are carried as received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadResponse {
    /// Length byte as sent by the display.
    pub length: u8,
    /// Echoed VP address.
    pub address: u16,
    /// Echoed register count.
    pub count: u8,
    /// Register value.
    pub value: u16,
}

impl ReadResponse {
    /// Create a response for a single register as the display would send it.
    pub fn new(address: u16, value: u16) -> Self {
        ReadResponse {
            length: READ_REGISTER_LEN,
            address,
            count: READ_REGISTER_COUNT,
            value,
        }
    }

    /// Validate and decode a read-register reply.
    pub fn decode(data: &[u8]) -> Result<Self, ResponseFault> {
        if data.len() != READ_RESPONSE_SIZE {
            return Err(ResponseFault::Truncated {
                expected: READ_RESPONSE_SIZE,
                actual: data.len(),
            });
        }
        if !has_header(data) {
            return Err(ResponseFault::BadHeader([data[0], data[1]]));
        }
        if data[3] != CMD_READ_REGISTER {
            return Err(ResponseFault::UnexpectedCommand(data[3]));
        }

        Ok(ReadResponse {
            length: data[2],
            address: u16::from_be_bytes([data[4], data[5]]),
            count: data[6],
            value: u16::from_be_bytes([data[7], data[8]]),
        })
    }

    /// Encode the reply as it appears on the wire.
    pub fn encode(&self) -> Vec<u8> {
        let [addr_hi, addr_lo] = self.address.to_be_bytes();
        let [val_hi, val_lo] = self.value.to_be_bytes();
        encode_frame(
            self.length,
            CMD_READ_REGISTER,
            &[addr_hi, addr_lo, self.count, val_hi, val_lo],
        )
    }
}
