//! [`ControlTransfer`] over an opened `rusb` device handle.

use std::time::Duration;

use log::trace;
use rusb::{DeviceHandle, UsbContext};
use ztex_protocol::ControlRequest;

use crate::{ControlTransfer, DEFAULT_CONTROL_TIMEOUT};

/// Issues ZTEX vendor requests through libusb.
///
/// Finding and opening the device is left to the caller, usually with
/// [`rusb::open_device_with_vid_pid`] and
/// [`VENDOR_ID`](ztex_protocol::VENDOR_ID)/[`PRODUCT_ID`](ztex_protocol::PRODUCT_ID).
pub struct UsbTransport<C: UsbContext> {
    handle: DeviceHandle<C>,
    timeout: Duration,
}

impl<C: UsbContext> UsbTransport<C> {
    pub fn new(handle: DeviceHandle<C>) -> Self {
        Self::with_timeout(handle, DEFAULT_CONTROL_TIMEOUT)
    }

    pub fn with_timeout(handle: DeviceHandle<C>, timeout: Duration) -> Self {
        Self { handle, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn handle(&self) -> &DeviceHandle<C> {
        &self.handle
    }

    pub fn into_handle(self) -> DeviceHandle<C> {
        self.handle
    }
}

impl<C: UsbContext> ControlTransfer for UsbTransport<C> {
    type Error = rusb::Error;

    fn control(&mut self, request: &ControlRequest, buf: &mut [u8]) -> Result<usize, rusb::Error> {
        let request_type = request.request_type.bits();
        trace!(
            "libusb control: type {request_type:#04x}, request {:#04x}, {} bytes",
            request.request,
            buf.len()
        );

        if request.request_type.is_in() {
            self.handle.read_control(
                request_type,
                request.request,
                request.value,
                request.index,
                buf,
                self.timeout,
            )
        } else {
            self.handle.write_control(
                request_type,
                request.request,
                request.value,
                request.index,
                buf,
                self.timeout,
            )
        }
    }
}

impl<C: UsbContext> std::fmt::Debug for UsbTransport<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsbTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
