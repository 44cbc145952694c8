//! Register access client.
//!
//! [`HmiClient`] owns a [`ByteTransport`] and runs one request/reply exchange
//! per primitive call. There is no pipelining and no retry: a timeout or a
//! rejected reply ends the call.

use std::time::{Duration, Instant};

use bytes::Bytes;
use dwin_hmi_metrics::{metric_defs, MetricLabels};
use log::{debug, trace, warn};

use crate::commands::Command;
use crate::constants::*;
use crate::error::*;
use crate::responses::ReadResponse;
use crate::transport::{read_bytes, ByteTransport};
use crate::words::{join_f32, next_address, split_f32};

/// Client-side settings that do not belong to the transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Back-off between polls while waiting for reply bytes.
    pub poll_interval: Duration,
    /// Metric labels identifying this display.
    pub labels: MetricLabels,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            poll_interval: DEFAULT_POLL_INTERVAL,
            labels: MetricLabels::default(),
        }
    }
}

/// Reads and writes VP registers on one display.
///
/// The client takes exclusive ownership of its transport; every operation
/// borrows it mutably, so exchanges can never interleave on one handle.
#[derive(Debug)]
pub struct HmiClient<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: ByteTransport> HmiClient<T> {
    /// Create a client with default settings.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    /// Create a client with explicit settings.
    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        HmiClient { transport, config }
    }

    /// The client's settings.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Borrow the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back to the caller.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Transmit a raw packet.
    pub fn send_packet(&mut self, packet: &[u8]) -> HmiResult<()> {
        trace!("tx [{}]", hex::encode_upper(packet));
        self.transport.write_all(packet)?;
        metrics::counter!(metric_defs::BYTES_SENT.name, &self.config.labels.to_labels())
            .increment(packet.len() as u64);
        Ok(())
    }

    /// Read up to `length` bytes before the deadline.
    ///
    /// `timeout` overrides the transport's default for this call. The result
    /// may be short; it is returned unvalidated.
    pub fn read_bytes(&mut self, length: usize, timeout: Option<Duration>) -> HmiResult<Bytes> {
        let timeout = timeout.unwrap_or_else(|| self.transport.timeout());
        let data = read_bytes(
            &mut self.transport,
            length,
            timeout,
            self.config.poll_interval,
        )?;
        trace!("rx [{}]", hex::encode_upper(&data));
        metrics::counter!(
            metric_defs::BYTES_RECEIVED.name,
            &self.config.labels.to_labels()
        )
        .increment(data.len() as u64);
        Ok(data)
    }

    /// Write one 16-bit register.
    ///
    /// The 6-byte ACK is read and discarded without validation: a missing or
    /// garbled ACK does not fail the call.
    pub fn write_register(&mut self, address: u16, value: u16) -> HmiResult<()> {
        let command = Command::WriteRegister { address, value };
        let ack = self.exchange(&command)?;

        if ack.len() < WRITE_ACK_SIZE {
            debug!(
                "short ACK for write 0x{:04X}: {} of {} bytes",
                address,
                ack.len(),
                WRITE_ACK_SIZE
            );
            metrics::counter!(metric_defs::SHORT_ACKS.name, &self.config.labels.to_labels())
                .increment(1);
        }
        Ok(())
    }

    /// Read one 16-bit register.
    pub fn read_register(&mut self, address: u16) -> HmiResult<u16> {
        let command = Command::ReadRegister { address };
        let reply = self.exchange(&command)?;

        match ReadResponse::decode(&reply) {
            Ok(response) => Ok(response.value),
            Err(fault) => {
                warn!("rejected reply to read 0x{:04X}: {}", address, fault);
                let labels = self
                    .config
                    .labels
                    .with(&[("fault", fault_label(&fault).to_string())]);
                metrics::counter!(metric_defs::INVALID_RESPONSES.name, &labels).increment(1);
                Err(HmiError::InvalidResponse {
                    bytes: reply.to_vec(),
                    fault,
                })
            }
        }
    }

    /// Write a float to `address` (MSW) and `address + 1` (LSW).
    ///
    /// Two full round trips; nothing makes the pair atomic.
    pub fn write_float(&mut self, address: u16, value: f32) -> HmiResult<()> {
        let (msw, lsw) = split_f32(value);
        self.write_register(address, msw)?;
        self.write_register(next_address(address), lsw)
    }

    /// Read a float from `address` (MSW) and `address + 1` (LSW).
    pub fn read_float(&mut self, address: u16) -> HmiResult<f32> {
        let msw = self.read_register(address)?;
        let lsw = self.read_register(next_address(address))?;
        Ok(join_f32(msw, lsw))
    }

    /// Send a command and read its fixed-size reply.
    fn exchange(&mut self, command: &Command) -> HmiResult<Bytes> {
        let labels = self
            .config
            .labels
            .with(&[("command", command.name().to_string())]);
        let started = Instant::now();

        let result = self
            .send_packet(&command.encode())
            .and_then(|()| {
                metrics::counter!(metric_defs::FRAMES_SENT.name, &labels).increment(1);
                self.read_bytes(command.reply_len(), None)
            });

        match &result {
            Ok(_) => {
                metrics::histogram!(metric_defs::ROUND_TRIP_TIME.name, &labels)
                    .record(started.elapsed().as_micros() as f64);
            }
            Err(e) => {
                warn!("{} failed: {}", command.name(), e);
                metrics::counter!(metric_defs::TRANSPORT_ERRORS.name, &labels).increment(1);
            }
        }
        result
    }
}

fn fault_label(fault: &ResponseFault) -> &'static str {
    match fault {
        ResponseFault::Truncated { .. } => "truncated",
        ResponseFault::BadHeader(_) => "bad_header",
        ResponseFault::UnexpectedCommand(_) => "unexpected_command",
    }
}
