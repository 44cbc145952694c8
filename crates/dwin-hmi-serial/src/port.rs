//! `ByteTransport` over a serial port.

use std::io::{self, Read, Write};
use std::time::Duration;

use dwin_hmi_protocol::ByteTransport;
use log::{debug, info};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::config::SerialConfig;
use crate::error::{SerialError, SerialResult};

/// A display connection over a serial port (8N1, no flow control).
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    timeout: Duration,
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("port", &self.port.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SerialTransport {
    /// Open the port described by `config`.
    pub fn open(config: &SerialConfig) -> SerialResult<Self> {
        config.validate()?;
        let timeout = config.timeout()?;

        let port = serialport::new(&config.port, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(timeout)
            .open()
            .map_err(|source| SerialError::Open {
                port: config.port.clone(),
                source,
            })?;

        info!(
            "opened {} at {} baud (timeout {:?})",
            config.port, config.baud_rate, timeout
        );
        Ok(Self::from_port(port, timeout))
    }

    /// Wrap a port the caller already opened.
    pub fn from_port(port: Box<dyn SerialPort>, timeout: Duration) -> Self {
        SerialTransport { port, timeout }
    }

    /// Port name, if the backend knows it.
    pub fn name(&self) -> Option<String> {
        self.port.name()
    }

    /// Drop any bytes waiting in the input and output buffers.
    pub fn clear_buffers(&mut self) -> io::Result<()> {
        self.port
            .clear(serialport::ClearBuffer::All)
            .map_err(io::Error::from)
    }

    /// Give the underlying port back.
    pub fn into_inner(self) -> Box<dyn SerialPort> {
        self.port
    }
}

impl ByteTransport for SerialTransport {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        Write::write_all(&mut self.port, bytes)?;
        self.port.flush()
    }

    fn bytes_available(&mut self) -> io::Result<usize> {
        let count = self.port.bytes_to_read().map_err(io::Error::from)?;
        Ok(count as usize)
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        let mut byte = [0u8; 1];
        self.port.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Names of the serial ports present on this machine.
pub fn available_ports() -> SerialResult<Vec<String>> {
    let ports = serialport::available_ports().map_err(SerialError::Enumerate)?;
    debug!("found {} serial ports", ports.len());
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
