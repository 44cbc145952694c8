//! End-to-end register and float exchanges against the in-memory transport.

use std::time::Duration;

use dwin_hmi_protocol::{
    split_f32, ClientConfig, Command, HmiClient, HmiError, MockTransport, ReadResponse,
    ResponseFault, WRITE_ACK,
};

/// Helper to build a client with a short deadline so timeout tests stay fast.
fn hmi(transport: MockTransport) -> HmiClient<MockTransport> {
    HmiClient::with_config(
        transport.with_timeout(Duration::from_millis(25)),
        ClientConfig {
            poll_interval: Duration::from_micros(200),
            ..ClientConfig::default()
        },
    )
}

fn read_response(address: u16, value: u16) -> Vec<u8> {
    ReadResponse::new(address, value).encode()
}

// ============================================================================
// Scripted replies
// ============================================================================

#[test]
fn test_register_read_write_flow() {
    let mut transport = MockTransport::new();
    transport.queue_rx(&WRITE_ACK);
    let mut hmi = hmi(transport);

    hmi.write_register(0x07D0, 1234).unwrap();
    assert_eq!(
        hmi.transport_mut().take_written(),
        vec![0x5A, 0xA5, 0x05, 0x82, 0x07, 0xD0, 0x04, 0xD2]
    );

    hmi.transport_mut().queue_rx(&read_response(0x07D0, 1234));
    assert_eq!(hmi.read_register(0x07D0).unwrap(), 1234);
}

#[test]
fn test_read_register_known_reply() {
    let mut transport = MockTransport::new();
    transport.queue_rx(&[0x5A, 0xA5, 0x04, 0x83, 0x07, 0xD0, 0x01, 0x04, 0xD2]);
    let mut hmi = hmi(transport);

    assert_eq!(hmi.read_register(0x07D0).unwrap(), 0x04D2);
}

#[test]
fn test_read_register_rejects_corrupt_header() {
    let mut transport = MockTransport::new();
    transport.queue_rx(&[0x5A, 0x00, 0x04, 0x83, 0x07, 0xD0, 0x01, 0x04, 0xD2]);
    let mut hmi = hmi(transport);

    let err = hmi.read_register(0x07D0).unwrap_err();
    assert!(matches!(
        err,
        HmiError::InvalidResponse {
            fault: ResponseFault::BadHeader([0x5A, 0x00]),
            ..
        }
    ));
}

#[test]
fn test_read_register_rejects_wrong_command() {
    let mut transport = MockTransport::new();
    // A stray write ACK padded to nine bytes
    transport.queue_rx(&[0x5A, 0xA5, 0x03, 0x82, 0x4F, 0x4B, 0x00, 0x00, 0x00]);
    let mut hmi = hmi(transport);

    let err = hmi.read_register(0x07D0).unwrap_err();
    match err {
        HmiError::InvalidResponse { bytes, fault } => {
            assert_eq!(fault, ResponseFault::UnexpectedCommand(0x82));
            assert_eq!(bytes.len(), 9);
        }
        other => panic!("expected InvalidResponse, got {:?}", other),
    }
}

#[test]
fn test_read_register_times_out_with_no_reply() {
    let mut hmi = hmi(MockTransport::new());

    let err = hmi.read_register(0x0001).unwrap_err();
    match err {
        HmiError::InvalidResponse { bytes, fault } => {
            assert!(bytes.is_empty());
            assert_eq!(
                fault,
                ResponseFault::Truncated {
                    expected: 9,
                    actual: 0
                }
            );
        }
        other => panic!("expected InvalidResponse, got {:?}", other),
    }
}

#[test]
fn test_reply_bytes_of_next_frame_are_not_consumed() {
    let mut transport = MockTransport::new();
    let mut stream = read_response(0x0010, 0xAAAA);
    stream.extend_from_slice(&read_response(0x0011, 0xBBBB));
    transport.queue_rx(&stream);
    let mut hmi = hmi(transport);

    assert_eq!(hmi.read_register(0x0010).unwrap(), 0xAAAA);
    assert_eq!(hmi.transport().pending_rx(), 9);
    assert_eq!(hmi.read_register(0x0011).unwrap(), 0xBBBB);
}

#[test]
fn test_float_read_write_flow() {
    let mut transport = MockTransport::new();
    transport.queue_rx(&WRITE_ACK);
    transport.queue_rx(&WRITE_ACK);
    let mut hmi = hmi(transport);

    let pi = 3.1415_f32;
    hmi.write_float(0x0800, pi).unwrap();

    let written = hmi.transport_mut().take_written();
    assert_eq!(written.len(), 16);
    assert_eq!(&written[0..8], &[0x5A, 0xA5, 0x05, 0x82, 0x08, 0x00, 0x40, 0x49]);
    assert_eq!(&written[8..16], &[0x5A, 0xA5, 0x05, 0x82, 0x08, 0x01, 0x0E, 0x56]);

    let (msw, lsw) = split_f32(pi);
    hmi.transport_mut().queue_rx(&read_response(0x0800, msw));
    hmi.transport_mut().queue_rx(&read_response(0x0801, lsw));
    assert_eq!(hmi.read_float(0x0800).unwrap(), pi);
}

#[test]
fn test_read_float_stops_at_first_failure() {
    let mut transport = MockTransport::new();
    transport.queue_rx(&[0x00; 9]);
    let mut hmi = hmi(transport);

    assert!(hmi.read_float(0x0800).unwrap_err().is_invalid_response());
    // Only the MSW request went out
    assert_eq!(hmi.transport().written().len(), 7);
}

// ============================================================================
// Emulated display
// ============================================================================

#[test]
fn test_float_round_trip_through_device() {
    let mut hmi = hmi(MockTransport::with_device());

    for value in [0.0_f32, 3.1415, -1.0, 65504.5] {
        hmi.write_float(0x0800, value).unwrap();
        let read = hmi.read_float(0x0800).unwrap();
        assert_eq!(read.to_bits(), value.to_bits(), "round trip of {}", value);
    }

    let requests = hmi.transport().device().unwrap().requests();
    assert_eq!(requests.len(), 16);
    assert_eq!(
        requests[0],
        Command::WriteRegister {
            address: 0x0800,
            value: 0x0000
        }
    );
    assert_eq!(requests[2], Command::ReadRegister { address: 0x0800 });
    assert_eq!(requests[3], Command::ReadRegister { address: 0x0801 });
}

#[test]
fn test_float_round_trip_special_values() {
    let mut hmi = hmi(MockTransport::with_device());

    for value in [-0.0_f32, f32::MIN_POSITIVE, f32::MAX, f32::INFINITY, f32::NAN] {
        hmi.write_float(0x1000, value).unwrap();
        assert_eq!(hmi.read_float(0x1000).unwrap().to_bits(), value.to_bits());
    }
}

#[test]
fn test_float_at_top_address_wraps() {
    let mut hmi = hmi(MockTransport::with_device());
    hmi.write_float(0xFFFF, 1.0).unwrap();

    let device = hmi.transport().device().unwrap();
    assert_eq!(device.register(0xFFFF), Some(0x3F80));
    assert_eq!(device.register(0x0000), Some(0x0000));
    assert_eq!(hmi.read_float(0xFFFF).unwrap(), 1.0);
}

#[test]
fn test_muted_device_write_succeeds_read_fails() {
    let mut transport = MockTransport::with_device();
    transport.device_mut().unwrap().set_muted(true);
    let mut hmi = hmi(transport);

    hmi.write_register(0x5000, 5).unwrap();
    assert_eq!(hmi.transport().device().unwrap().register(0x5000), Some(5));
    assert!(hmi.read_register(0x5000).unwrap_err().is_invalid_response());
}

#[test]
fn test_slow_device_reply_within_deadline() {
    let mut transport = MockTransport::with_device();
    transport.device_mut().unwrap().set_register(0x07D0, 0x1234);
    transport.hold_rx_for_polls(10);
    let mut hmi = hmi(transport);

    assert_eq!(hmi.read_register(0x07D0).unwrap(), 0x1234);
    assert_eq!(hmi.transport().pending_rx(), 0);
}

#[test]
fn test_reply_after_deadline_stays_queued() {
    let mut transport = MockTransport::with_device();
    transport.device_mut().unwrap().set_register(0x07D0, 0x1234);
    transport.hold_rx_for_polls(usize::MAX);
    let mut hmi = hmi(transport);

    let err = hmi.read_register(0x07D0).unwrap_err();
    assert!(err.is_invalid_response());
    assert_eq!(hmi.transport().pending_rx(), 9);

    // The stale reply is still there for whoever reads next
    hmi.transport_mut().hold_rx_for_polls(0);
    let stale = hmi.read_bytes(9, None).unwrap();
    assert_eq!(ReadResponse::decode(&stale).unwrap().value, 0x1234);
}
