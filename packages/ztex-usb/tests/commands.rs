use std::collections::VecDeque;

use log::LevelFilter;
use simplelog::{Config, TestLogger};
use ztex_usb::{
    commands::{GetFlashStatus, GetFpgaStatus, ReadConfiguration, ResetFpga, ResetFx3},
    protocol::{
        Capability, CapabilitySet, ControlRequest, DecodeErrorKind, FlashError, FpgaResult,
        RequestType, StatusConvention, vreq,
    },
    Command, ControlTransfer, Device, DeviceOptions, Error,
};

#[derive(Debug, thiserror::Error)]
#[error("device disconnected")]
struct Disconnected;

enum Reply {
    /// Bytes the device sends back. The reported length is the full length,
    /// even when it does not fit in the buffer.
    Data(Vec<u8>),
    /// Number of bytes a command reports as transferred.
    Ack(usize),
    Fail,
}

/// Records every request and answers from a script.
#[derive(Default)]
struct Recorder {
    requests: Vec<ControlRequest>,
    replies: VecDeque<Reply>,
}

impl Recorder {
    fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            requests: Vec::new(),
            replies: replies.into_iter().collect(),
        }
    }
}

impl ControlTransfer for Recorder {
    type Error = Disconnected;

    fn control(&mut self, request: &ControlRequest, buf: &mut [u8]) -> Result<usize, Disconnected> {
        assert_eq!(buf.len(), usize::from(request.length));
        self.requests.push(*request);

        match self.replies.pop_front() {
            Some(Reply::Data(data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                Ok(data.len())
            }
            Some(Reply::Ack(n)) => Ok(n),
            Some(Reply::Fail) | None => Err(Disconnected),
        }
    }
}

fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// A 40-byte descriptor with the given firmware version and capability bytes.
fn descriptor(firmware: u8, capabilities: [u8; 2]) -> Vec<u8> {
    let mut buf = vec![0; 40];
    buf[..12].copy_from_slice(&[40, 1, b'Z', b'T', b'E', b'X', 10, 41, 0, 0, firmware, 1]);
    buf[12..14].copy_from_slice(&capabilities);
    buf[30..37].copy_from_slice(b"SERIAL1");
    buf
}

fn configuration() -> Vec<u8> {
    let mut buf = vec![0; 128];
    buf[..16].copy_from_slice(&[
        b'C', b'D', b'0', 2, 2, 14, b'd', 0, 11, 0, 3, b'2', b'C', 0, 0x44, 10,
    ]);
    buf[26..32].copy_from_slice(&[0x55, 0x00, 0x00, 0x01, 0x00, 0x00]);
    buf
}

const FPGA_AND_FLASH: [u8; 2] = [0b0000_0110, 0];

fn open(capabilities: [u8; 2], replies: impl IntoIterator<Item = Reply>) -> Device<Recorder> {
    let mut script = vec![
        Reply::Data(descriptor(1, capabilities)),
        Reply::Data(configuration()),
    ];
    script.extend(replies);

    Device::open(Recorder::new(script)).unwrap()
}

#[test]
fn open_reads_descriptor_then_configuration() {
    init_logger();
    let device = open(FPGA_AND_FLASH, []);

    assert_eq!(device.descriptor().product.name(), "ZTEX USB-FPGA Module 2.14");
    assert_eq!(device.descriptor().serial.to_string(), "SERIAL1");
    assert_eq!(device.configuration().board.version.to_string(), "2.14d");
    assert_eq!(device.convention(), StatusConvention::SDK);

    let requests = device.into_inner().requests;
    assert_eq!(
        requests,
        [ControlRequest::READ_DESCRIPTOR, ControlRequest::READ_CONFIGURATION]
    );
    assert_eq!(requests[0].request_type.bits(), 0xC0);
    assert_eq!(requests[0].request, 0x22);
    assert_eq!(requests[0].length, 40);
    assert_eq!(requests[1].request, 0x3B);
    assert_eq!(requests[1].length, 128);
}

#[test]
fn convention_follows_firmware_version() {
    init_logger();
    let legacy = Device::open(Recorder::new([
        Reply::Data(descriptor(0, FPGA_AND_FLASH)),
        Reply::Data(configuration()),
    ]))
    .unwrap();
    assert_eq!(legacy.convention(), StatusConvention::LEGACY);

    let unknown = Device::open(Recorder::new([
        Reply::Data(descriptor(200, FPGA_AND_FLASH)),
        Reply::Data(configuration()),
    ]))
    .unwrap();
    assert_eq!(unknown.convention(), StatusConvention::SDK);

    let forced = Device::open_with(
        Recorder::new([
            Reply::Data(descriptor(200, FPGA_AND_FLASH)),
            Reply::Data(configuration()),
        ]),
        DeviceOptions::default().with_convention(StatusConvention::LEGACY),
    )
    .unwrap();
    assert_eq!(forced.convention(), StatusConvention::LEGACY);
}

#[test]
fn open_rejects_bad_configuration_signature() {
    init_logger();
    let mut config = configuration();
    config[..3].copy_from_slice(b"XY0");

    let err = Device::open(Recorder::new([
        Reply::Data(descriptor(1, FPGA_AND_FLASH)),
        Reply::Data(config),
    ]))
    .unwrap_err();

    let Error::Decode(err) = err else {
        panic!("expected a decode error, got {err:?}");
    };
    assert_eq!(
        err.kind(),
        DecodeErrorKind::SignatureMismatch {
            found: *b"XY0",
            expected: *b"CD0",
        }
    );
}

#[test]
fn short_descriptor_is_malformed() {
    init_logger();
    let err = Device::open(Recorder::new([Reply::Data(vec![40, 1, b'Z'])])).unwrap_err();

    let Error::Decode(err) = err else {
        panic!("expected a decode error, got {err:?}");
    };
    assert_eq!(
        err.kind(),
        DecodeErrorKind::MalformedLength {
            expected: 40,
            found: 3,
        }
    );
}

#[test]
fn fpga_status_uses_device_convention() {
    init_logger();
    let mut device = open(
        FPGA_AND_FLASH,
        [Reply::Data(vec![0x00, 0x5A, 0x00, 0x00, 0x01, 0x00, 0x01, 0x03, 0x00])],
    );

    let status = device.fpga_status().unwrap();
    assert!(status.is_configured());
    assert_eq!(status.transferred, 65536);
    assert_eq!(status.result, FpgaResult::NoBitstream);
    assert!(!status.bit_order_swapped.is_set());

    let request = device.transport_mut().requests[2];
    assert_eq!(request, ControlRequest::FPGA_STATUS);
    assert_eq!(request.request, vreq::FPGA_STATUS);
    assert_eq!(request.length, 9);
}

#[test]
fn flash_status() {
    init_logger();
    let mut device = open(
        FPGA_AND_FLASH,
        [Reply::Data(vec![1, 0x0C, 0x80, 0x00, 0x04, 0x00, 0x00, 0x00])],
    );

    let status = device.flash_status().unwrap();
    assert!(status.enabled.is_set());
    assert_eq!(status.sector_size.bytes(), Some(4096));
    assert_eq!(status.sector_count, 1024);
    assert_eq!(status.error, FlashError::None);
    assert_eq!(status.capacity(), Some(4 << 20));
}

#[test]
fn reset_fpga_sends_vendor_command() {
    init_logger();
    let mut device = open(FPGA_AND_FLASH, [Reply::Ack(0)]);

    device.reset_fpga().unwrap();

    let request = device.into_inner().requests[2];
    assert_eq!(request.request_type, RequestType::VENDOR_OUT);
    assert_eq!(request.request, 0x31);
    assert_eq!(request.value, 0);
    assert_eq!(request.length, 0);
}

#[test]
fn reset_fx3_sends_value_one() {
    init_logger();
    let mut transport = Recorder::new([Reply::Ack(0)]);
    let capabilities = CapabilitySet::default().with(Capability::Fx3Firmware);

    ResetFx3 { capabilities }.execute(&mut transport).unwrap();

    assert_eq!(transport.requests.len(), 1);
    assert_eq!(transport.requests[0].request, 0xA1);
    assert_eq!(transport.requests[0].value, 1);
    assert_eq!(transport.requests[0].request_type.bits(), 0x40);
}

#[test]
fn gated_commands_issue_no_transfer() {
    init_logger();
    let mut device = open([0, 0], []);

    for err in [
        device.reset_fpga().unwrap_err(),
        device.reset_fx3().unwrap_err(),
        device.reset_default_firmware().unwrap_err(),
        device.fpga_status().unwrap_err(),
        device.flash_status().unwrap_err(),
        device.high_speed_endpoints().unwrap_err(),
        device.default_interface_info().unwrap_err(),
    ] {
        assert!(err.is_unsupported(), "{err:?}");
    }

    // Only the two reads made while opening.
    assert_eq!(device.into_inner().requests.len(), 2);
}

#[test]
fn unsupported_operation_names_capability() {
    init_logger();
    let mut transport = Recorder::default();

    let err = ResetFpga {
        capabilities: CapabilitySet::default(),
    }
    .execute(&mut transport)
    .unwrap_err();

    match err {
        Error::UnsupportedOperation {
            operation,
            capability,
        } => {
            assert_eq!(operation, "reset FPGA");
            assert_eq!(capability, Capability::FpgaConfiguration);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(transport.requests.is_empty());
}

#[test]
fn command_with_data_stage_is_rejected() {
    init_logger();
    let mut device = open(FPGA_AND_FLASH, [Reply::Ack(3)]);

    match device.reset_fpga().unwrap_err() {
        Error::UnexpectedResponseLength {
            expected, found, ..
        } => {
            assert_eq!(expected, 0);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn oversized_reply_is_rejected() {
    init_logger();
    let mut transport = Recorder::new([Reply::Data(vec![0; 12])]);

    let err = GetFlashStatus {
        capabilities: CapabilitySet::default().with(Capability::FlashMemory),
    }
    .execute(&mut transport)
    .unwrap_err();

    assert!(matches!(
        err,
        Error::UnexpectedResponseLength {
            expected: 8,
            found: 12,
            ..
        }
    ));
}

#[test]
fn short_status_reply_is_malformed() {
    init_logger();
    let mut transport = Recorder::new([Reply::Data(vec![0; 5])]);

    let err = GetFpgaStatus {
        capabilities: CapabilitySet::default().with(Capability::FpgaConfiguration),
        convention: StatusConvention::SDK,
    }
    .execute(&mut transport)
    .unwrap_err();

    let Error::Decode(err) = err else {
        panic!("expected a decode error, got {err:?}");
    };
    assert_eq!(
        err.kind(),
        DecodeErrorKind::MalformedLength {
            expected: 9,
            found: 5,
        }
    );
}

#[test]
fn transport_failure_is_propagated() {
    init_logger();
    let mut transport = Recorder::new([Reply::Fail]);

    let err = ReadConfiguration.execute(&mut transport).unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.to_string(), "Control transfer failed: device disconnected");
}

#[test]
fn refresh_keeps_cached_configuration_on_failure() {
    init_logger();
    let mut device = open(FPGA_AND_FLASH, [Reply::Fail]);
    let before = *device.configuration();

    assert!(device.refresh_configuration().is_err());
    assert_eq!(*device.configuration(), before);
}

#[test]
fn auxiliary_reads() {
    init_logger();
    let capabilities = [0b0010_0000, 0b0001_0000];
    let mut device = open(
        capabilities,
        [Reply::Data(vec![0x06, 0x00]), Reply::Data(vec![1, 0x02, 0x04])],
    );

    let endpoints = device.high_speed_endpoints().unwrap();
    assert_eq!(endpoints.endpoint, 0x06);
    assert!(endpoints.is_supported());

    let info = device.default_interface_info().unwrap();
    assert_eq!(info.major_version, 1);
    assert_eq!(info.minor_version, None);
    assert_eq!(info.output_endpoint, 0x02);
    assert_eq!(info.input_endpoint, 0x84);

    let requests = device.into_inner().requests;
    assert_eq!(requests[2].request, 0x33);
    assert_eq!(requests[2].length, 2);
    assert_eq!(requests[3].request, 0x64);
    assert_eq!(requests[3].length, 4);
}
