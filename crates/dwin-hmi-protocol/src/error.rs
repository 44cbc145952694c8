//! Protocol error types.

use std::io;

use thiserror::Error;

/// Errors returned by [`HmiClient`](crate::HmiClient) operations.
#[derive(Error, Debug)]
pub enum HmiError {
    /// The reply to a read-register request was short or malformed.
    ///
    /// Carries the raw bytes that were received so the caller can log them.
    #[error("invalid response: {fault} (received [{}])", hex::encode_upper(.bytes))]
    InvalidResponse {
        /// Bytes received before the deadline.
        bytes: Vec<u8>,
        /// The first check the response failed.
        fault: ResponseFault,
    },

    /// The byte transport failed. Propagated unmodified.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),
}

impl HmiError {
    /// Returns true if this is a protocol validation failure rather than a transport fault.
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, HmiError::InvalidResponse { .. })
    }
}

/// Result type alias for HMI operations.
pub type HmiResult<T> = Result<T, HmiError>;

/// Why a read-register response was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFault {
    /// Fewer bytes than a full response arrived before the deadline.
    #[error("expected {expected} bytes, got {actual}")]
    Truncated {
        /// Expected response length.
        expected: usize,
        /// Bytes actually received.
        actual: usize,
    },

    /// The frame did not start with `5A A5`.
    #[error("bad header {0:02X?}")]
    BadHeader([u8; 2]),

    /// The command echo was not the read-register command.
    #[error("unexpected command echo 0x{0:02X}")]
    UnexpectedCommand(u8),
}

/// Errors that can occur when decoding a request frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame is too short to be valid.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Frame does not start with the `5A A5` header.
    #[error("bad frame header: {0:02X?}")]
    BadHeader([u8; 2]),

    /// Unknown command code.
    #[error("unknown command code: 0x{0:02X}")]
    UnknownCommand(u8),

    /// Length byte does not match the command.
    #[error("length mismatch for command 0x{command:02X}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Command code of the frame.
        command: u8,
        /// Length byte the command requires.
        expected: u8,
        /// Length byte found in the frame.
        actual: u8,
    },
}
