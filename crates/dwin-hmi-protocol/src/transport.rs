//! Byte transport abstraction and the deadline-bounded reader.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use bytes::{BufMut, Bytes, BytesMut};

/// A raw byte stream to the display (usually a serial port).
///
/// Implementations must not block in [`bytes_available`](Self::bytes_available)
/// and may assume [`read_byte`](Self::read_byte) is only called when at least
/// one byte is available.
pub trait ByteTransport {
    /// Send the whole buffer.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Number of bytes that can be read without blocking.
    fn bytes_available(&mut self) -> io::Result<usize>;

    /// Read one byte that is already available.
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Default read deadline for one reply.
    fn timeout(&self) -> Duration;
}

impl<T: ByteTransport + ?Sized> ByteTransport for &mut T {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_all(bytes)
    }

    fn bytes_available(&mut self) -> io::Result<usize> {
        (**self).bytes_available()
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        (**self).read_byte()
    }

    fn timeout(&self) -> Duration {
        (**self).timeout()
    }
}

impl<T: ByteTransport + ?Sized> ByteTransport for Box<T> {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_all(bytes)
    }

    fn bytes_available(&mut self) -> io::Result<usize> {
        (**self).bytes_available()
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        (**self).read_byte()
    }

    fn timeout(&self) -> Duration {
        (**self).timeout()
    }
}

/// Read up to `length` bytes, one at a time, until `timeout` elapses.
///
/// Bytes are pulled singly so nothing past `length` is consumed from the
/// transport. When the transport is idle the loop sleeps for `poll_interval`
/// (never past the deadline); a zero interval spins. The result may be shorter
/// than `length` if the deadline passed first; that is not an error here.
/// A timeout too large to represent as an `Instant` means no deadline.
pub fn read_bytes<T: ByteTransport + ?Sized>(
    transport: &mut T,
    length: usize,
    timeout: Duration,
    poll_interval: Duration,
) -> io::Result<Bytes> {
    let deadline = Instant::now().checked_add(timeout);
    let mut buffer = BytesMut::with_capacity(length);

    while buffer.len() < length {
        let now = Instant::now();
        if deadline.is_some_and(|deadline| now >= deadline) {
            break;
        }

        if transport.bytes_available()? > 0 {
            buffer.put_u8(transport.read_byte()?);
        } else if !poll_interval.is_zero() {
            let nap = match deadline {
                Some(deadline) => poll_interval.min(deadline.saturating_duration_since(now)),
                None => poll_interval,
            };
            thread::sleep(nap);
        }
    }

    Ok(buffer.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockTransport;

    #[test]
    fn test_reads_exactly_length() {
        let mut transport = MockTransport::new();
        transport.queue_rx(&[1, 2, 3, 4, 5]);

        let data = read_bytes(
            &mut transport,
            3,
            Duration::from_millis(50),
            Duration::ZERO,
        )
        .unwrap();
        assert_eq!(&data[..], &[1, 2, 3]);
        // The rest stays in the transport for the next frame
        assert_eq!(transport.pending_rx(), 2);
    }

    #[test]
    fn test_short_read_on_deadline() {
        let mut transport = MockTransport::new();
        transport.queue_rx(&[0x5A, 0xA5]);

        let started = Instant::now();
        let data = read_bytes(
            &mut transport,
            9,
            Duration::from_millis(20),
            Duration::from_millis(1),
        )
        .unwrap();
        assert_eq!(&data[..], &[0x5A, 0xA5]);
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_unbounded_timeout_does_not_overflow() {
        let mut transport = MockTransport::new();
        transport.queue_rx(&[1, 2]);

        let data = read_bytes(&mut transport, 2, Duration::MAX, Duration::ZERO).unwrap();
        assert_eq!(&data[..], &[1, 2]);
    }

    #[test]
    fn test_reply_arriving_after_idle_polls() {
        let mut transport = MockTransport::new();
        transport.queue_rx(&[0x5A, 0xA5, 0x04, 0x83, 0x07, 0xD0, 0x01, 0x04, 0xD2]);
        transport.hold_rx_for_polls(5);

        let data = read_bytes(
            &mut transport,
            9,
            Duration::from_millis(200),
            Duration::from_millis(1),
        )
        .unwrap();
        assert_eq!(data.len(), 9);
        assert_eq!(transport.held_polls(), 0);
        let response = crate::ReadResponse::decode(&data).unwrap();
        assert_eq!(response.address, 0x07D0);
        assert_eq!(response.value, 1234);
    }

    #[test]
    fn test_reply_arriving_after_deadline_is_left_unread() {
        let mut transport = MockTransport::new();
        transport.queue_rx(&[0x5A, 0xA5, 0x04, 0x83, 0x07, 0xD0, 0x01, 0x04, 0xD2]);
        transport.hold_rx_for_polls(usize::MAX);

        let data = read_bytes(
            &mut transport,
            9,
            Duration::from_millis(20),
            Duration::from_millis(1),
        )
        .unwrap();
        assert!(data.is_empty());
        assert_eq!(transport.pending_rx(), 9);
        assert!(transport.held_polls() > 0);
    }

    #[test]
    fn test_zero_timeout_reads_nothing() {
        let mut transport = MockTransport::new();
        transport.queue_rx(&[1, 2, 3]);

        let data = read_bytes(&mut transport, 3, Duration::ZERO, Duration::ZERO).unwrap();
        assert!(data.is_empty());
        assert_eq!(transport.pending_rx(), 3);
    }

    #[test]
    fn test_transport_fault_propagates() {
        let mut transport = MockTransport::new();
        transport.queue_rx(&[1, 2, 3]);
        transport.fail_next(io::ErrorKind::BrokenPipe);

        let err = read_bytes(
            &mut transport,
            3,
            Duration::from_millis(20),
            Duration::ZERO,
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut transport: Box<dyn ByteTransport> = Box::new(MockTransport::new());
        transport.write_all(&[0x00]).unwrap();
        assert_eq!(transport.bytes_available().unwrap(), 0);
        let data = read_bytes(&mut transport, 1, Duration::from_millis(5), Duration::ZERO).unwrap();
        assert!(data.is_empty());
    }
}
