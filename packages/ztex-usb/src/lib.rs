//! Host-side access to ZTEX USB-FPGA modules.
//!
//! This crate does not talk to USB itself. Everything goes through a
//! [`ControlTransfer`] implementation supplied by the caller (or the
//! [`libusb`] adapter when the `rusb` feature is enabled), which keeps the
//! request logic testable against recorded replies.
//!
//! A [`ControlTransfer`] must not be shared between threads while a request
//! is in flight. Every method here takes `&mut self`, so one handle can only
//! ever have a single outstanding request; distinct devices can be driven
//! from distinct threads.

pub use ztex_protocol as protocol;

use std::time::Duration;

use ztex_protocol::ControlRequest;

pub mod commands;
mod device;
mod error;
#[cfg(feature = "rusb")]
pub mod libusb;

pub use commands::Command;
pub use device::{Device, DeviceOptions};
pub use error::Error;

/// Timeout the bundled transports use for each control transfer.
pub const DEFAULT_CONTROL_TIMEOUT: Duration = Duration::from_millis(1000);

/// Executes vendor control transfers on one device.
///
/// This is the only way this crate reaches the hardware. Timeouts, retries
/// and device selection are up to the implementation.
pub trait ControlTransfer {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends `request` and returns the number of bytes transferred in the
    /// data stage.
    ///
    /// For device-to-host requests the reply is written to the front of
    /// `buf`, which is [`ControlRequest::length`] bytes long. For commands
    /// `buf` is empty.
    fn control(&mut self, request: &ControlRequest, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: ControlTransfer + ?Sized> ControlTransfer for &mut T {
    type Error = T::Error;

    fn control(&mut self, request: &ControlRequest, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).control(request, buf)
    }
}
