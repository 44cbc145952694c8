//! In-memory transport for tests and offline development.
//!
//! [`MockTransport`] records everything written to it and serves reads from a
//! queue. With a [`MockDevice`] attached it behaves like a display: request
//! frames written by the host are parsed and answered with ACKs or read
//! replies backed by an in-memory register file.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::Duration;

use crate::commands::Command;
use crate::constants::*;
use crate::frame::FrameAssembler;
use crate::responses::ReadResponse;
use crate::transport::ByteTransport;

/// Emulated display register file.
#[derive(Debug, Default)]
pub struct MockDevice {
    registers: HashMap<u16, u16>,
    assembler: FrameAssembler,
    muted: bool,
    requests: Vec<Command>,
}

impl MockDevice {
    /// Create a device with all registers reading as zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a register, if it was ever written.
    pub fn register(&self, address: u16) -> Option<u16> {
        self.registers.get(&address).copied()
    }

    /// Preload a register.
    pub fn set_register(&mut self, address: u16, value: u16) {
        self.registers.insert(address, value);
    }

    /// Stop answering requests (simulates an unplugged or busy panel).
    ///
    /// Writes are still applied while muted.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> &[Command] {
        &self.requests
    }

    /// Feed host bytes in and collect the device's replies.
    fn receive(&mut self, data: &[u8], replies: &mut VecDeque<u8>) {
        self.assembler.push(data);
        while let Some(frame) = self.assembler.next_frame() {
            let command = match Command::decode(&frame) {
                Ok(command) => command,
                Err(e) => {
                    log::debug!("mock device dropped frame: {}", e);
                    continue;
                }
            };
            self.requests.push(command);

            let reply = match command {
                Command::WriteRegister { address, value } => {
                    self.registers.insert(address, value);
                    WRITE_ACK.to_vec()
                }
                Command::ReadRegister { address } => {
                    let value = self.register(address).unwrap_or(0);
                    ReadResponse::new(address, value).encode()
                }
            };
            if !self.muted {
                replies.extend(reply);
            }
        }
    }
}

/// A byte transport backed by memory.
#[derive(Debug)]
pub struct MockTransport {
    written: Vec<u8>,
    rx: VecDeque<u8>,
    timeout: Duration,
    device: Option<MockDevice>,
    fail_next: Option<io::ErrorKind>,
    held_polls: usize,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Create a transport with nothing to read and the default timeout.
    pub fn new() -> Self {
        MockTransport {
            written: Vec::new(),
            rx: VecDeque::new(),
            timeout: DEFAULT_TIMEOUT,
            device: None,
            fail_next: None,
            held_polls: 0,
        }
    }

    /// Create a transport with an emulated display attached.
    pub fn with_device() -> Self {
        MockTransport {
            device: Some(MockDevice::new()),
            ..Self::new()
        }
    }

    /// Set the default read timeout reported to the client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Queue bytes to be read.
    pub fn queue_rx(&mut self, data: &[u8]) {
        self.rx.extend(data.iter().copied());
    }

    /// Number of queued bytes not yet read.
    pub fn pending_rx(&self) -> usize {
        self.rx.len()
    }

    /// Everything written so far.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Take everything written so far, leaving the record empty.
    pub fn take_written(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.written)
    }

    /// Report nothing available for the next `polls` calls to
    /// `bytes_available`, as a slow display would. Queued bytes stay queued.
    pub fn hold_rx_for_polls(&mut self, polls: usize) {
        self.held_polls = polls;
    }

    /// Idle polls left before queued bytes become visible.
    pub fn held_polls(&self) -> usize {
        self.held_polls
    }

    /// Make the next transport call fail with the given error kind.
    pub fn fail_next(&mut self, kind: io::ErrorKind) {
        self.fail_next = Some(kind);
    }

    /// The emulated display, if attached.
    pub fn device(&self) -> Option<&MockDevice> {
        self.device.as_ref()
    }

    /// Mutable access to the emulated display, if attached.
    pub fn device_mut(&mut self) -> Option<&mut MockDevice> {
        self.device.as_mut()
    }

    fn check_fault(&mut self) -> io::Result<()> {
        match self.fail_next.take() {
            Some(kind) => Err(io::Error::new(kind, "injected transport fault")),
            None => Ok(()),
        }
    }
}

impl ByteTransport for MockTransport {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.check_fault()?;
        self.written.extend_from_slice(bytes);
        if let Some(device) = self.device.as_mut() {
            device.receive(bytes, &mut self.rx);
        }
        Ok(())
    }

    fn bytes_available(&mut self) -> io::Result<usize> {
        self.check_fault()?;
        if self.held_polls > 0 {
            self.held_polls -= 1;
            return Ok(0);
        }
        Ok(self.rx.len())
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        self.check_fault()?;
        self.rx
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::WouldBlock, "no byte available"))
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
