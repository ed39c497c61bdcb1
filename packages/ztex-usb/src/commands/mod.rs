//! Vendor requests, one type per operation.
//!
//! Commands that change device state, and reads that only some firmware
//! implements, carry the [`CapabilitySet`] of the device they target and
//! refuse to run before any transfer is issued when the required
//! [`Capability`] is missing.

use log::{debug, trace, warn};
use ztex_protocol::{
    Capability, CapabilitySet, ControlRequest, DeviceConfiguration, DeviceDescriptor,
    FixedResponse,
};

use crate::{ControlTransfer, Error};

mod firmware;
mod flash;
mod fpga;

pub use firmware::{
    ReadDefaultInterfaceInfo, ReadHighSpeedEndpoints, ResetDefaultFirmware, ResetFx3,
};
pub use flash::GetFlashStatus;
pub use fpga::{GetFpgaStatus, ResetFpga};

/// A single operation on a device.
pub trait Command {
    type Output;

    fn execute<T: ControlTransfer + ?Sized>(self, transport: &mut T) -> Result<Self::Output, Error>;
}

/// Reads the 40-byte ZTEX descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadDescriptor;

impl Command for ReadDescriptor {
    type Output = DeviceDescriptor;

    fn execute<T: ControlTransfer + ?Sized>(
        self,
        transport: &mut T,
    ) -> Result<DeviceDescriptor, Error> {
        read(transport, ControlRequest::READ_DESCRIPTOR, "read ZTEX descriptor")
    }
}

/// Reads the 128-byte configuration block from the MAC EEPROM.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadConfiguration;

impl Command for ReadConfiguration {
    type Output = DeviceConfiguration;

    fn execute<T: ControlTransfer + ?Sized>(
        self,
        transport: &mut T,
    ) -> Result<DeviceConfiguration, Error> {
        read(
            transport,
            ControlRequest::READ_CONFIGURATION,
            "read device configuration",
        )
    }
}

/// Fails with [`Error::UnsupportedOperation`] unless `capability` is present.
pub(crate) fn require(
    capabilities: &CapabilitySet,
    capability: Capability,
    operation: &'static str,
) -> Result<(), Error> {
    if !capabilities.has(capability) {
        warn!("Refusing to {operation}: device does not advertise {capability}");
        return Err(Error::UnsupportedOperation {
            operation,
            capability,
        });
    }

    Ok(())
}

/// Issues a device-to-host request and returns the bytes actually received.
pub(crate) fn transfer<T: ControlTransfer + ?Sized>(
    transport: &mut T,
    request: ControlRequest,
    operation: &'static str,
) -> Result<Vec<u8>, Error> {
    debug!(
        "{operation}: request {:#04x}, value {}, index {}, {} bytes",
        request.request, request.value, request.index, request.length
    );

    let mut buf = vec![0; usize::from(request.length)];
    let received = transport
        .control(&request, &mut buf)
        .map_err(Error::transport)?;

    if received > buf.len() {
        return Err(Error::UnexpectedResponseLength {
            operation,
            expected: buf.len(),
            found: received,
        });
    }
    buf.truncate(received);

    trace!("{operation}: received {received} bytes: {buf:02x?}");
    Ok(buf)
}

/// Issues a device-to-host request and decodes its fixed-length reply.
pub(crate) fn read<T, R>(
    transport: &mut T,
    request: ControlRequest,
    operation: &'static str,
) -> Result<R, Error>
where
    T: ControlTransfer + ?Sized,
    R: FixedResponse,
{
    let response = transfer(transport, request, operation)?;
    Ok(R::decode_response(&response)?)
}

/// Issues a command without a data stage. The device must report zero bytes.
pub(crate) fn command<T: ControlTransfer + ?Sized>(
    transport: &mut T,
    request: ControlRequest,
    operation: &'static str,
) -> Result<(), Error> {
    debug!(
        "{operation}: command {:#04x}, value {}, index {}",
        request.request, request.value, request.index
    );

    let transferred = transport
        .control(&request, &mut [])
        .map_err(Error::transport)?;

    if transferred != 0 {
        return Err(Error::UnexpectedResponseLength {
            operation,
            expected: 0,
            found: transferred,
        });
    }

    Ok(())
}
