//! Frame encoding/decoding utilities.
//!
//! Every DGUS frame starts with the `5A A5` header and a length byte that counts
//! the command byte and everything after it.
//!
//! ```text
//! +------+------+-----+-----+-------------------+
//! | 0x5A | 0xA5 | len | cmd | payload[0..len-1] |
//! +------+------+-----+-----+-------------------+
//! ```

use bytes::{Buf, BufMut, BytesMut};

use crate::constants::*;

/// Maximum frame size supported by the assembler (header + len + 255 bytes).
pub const MAX_FRAMED_SIZE: usize = FRAME_PREFIX_SIZE + u8::MAX as usize;

/// Build a frame from a length byte, command code and payload.
///
/// The length byte is written as given: protocol lengths are fixed per command
/// rather than derived from the payload.
pub fn encode_frame(len: u8, command: u8, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(FRAME_PREFIX_SIZE + 1 + payload.len());
    buf.put_slice(&FRAME_HEADER);
    buf.put_u8(len);
    buf.put_u8(command);
    buf.put_slice(payload);
    buf
}

/// Returns true if `data` starts with the frame header.
pub fn has_header(data: &[u8]) -> bool {
    data.len() >= FRAME_HEADER.len() && data[..FRAME_HEADER.len()] == FRAME_HEADER
}

/// Accumulates a byte stream and splits it into complete frames.
///
/// Garbage before a header is discarded. Used by the device side of
/// [`MockTransport`](crate::MockTransport), which receives requests as an
/// unstructured stream.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
}

impl FrameAssembler {
    /// Create a new frame assembler.
    pub fn new() -> Self {
        FrameAssembler {
            buffer: BytesMut::with_capacity(MAX_FRAMED_SIZE),
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Try to take one complete frame (header included) from the buffer.
    ///
    /// Returns `None` if more data is needed.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        // Resynchronise on the header, one byte at a time
        while !self.buffer.is_empty() && !self.at_header() {
            self.buffer.advance(1);
        }

        if self.buffer.len() < FRAME_PREFIX_SIZE {
            return None;
        }

        let total = FRAME_PREFIX_SIZE + self.buffer[2] as usize;
        if self.buffer.len() < total {
            return None;
        }

        Some(self.buffer.split_to(total).to_vec())
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    fn at_header(&self) -> bool {
        match self.buffer.len() {
            0 => false,
            1 => self.buffer[0] == FRAME_HEADER[0],
            _ => has_header(&self.buffer),
        }
    }
}
