use std::fmt;

use log::{debug, info, warn};
use ztex_protocol::{
    CapabilitySet, DefaultInterfaceInfo, DeviceConfiguration, DeviceDescriptor, FlashStatus,
    FpgaStatus, HighSpeedEndpoints, StatusConvention,
};

use crate::{
    commands::{
        Command, GetFlashStatus, GetFpgaStatus, ReadConfiguration, ReadDefaultInterfaceInfo,
        ReadDescriptor, ReadHighSpeedEndpoints, ResetDefaultFirmware, ResetFpga, ResetFx3,
    },
    ControlTransfer, Error,
};

/// Options used when opening a [`Device`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceOptions {
    /// How to interpret FPGA status replies.
    ///
    /// When `None`, the convention is chosen from the firmware version in
    /// the descriptor, falling back to [`StatusConvention::SDK`].
    pub convention: Option<StatusConvention>,
}

impl DeviceOptions {
    pub const fn with_convention(mut self, convention: StatusConvention) -> Self {
        self.convention = Some(convention);
        self
    }
}

/// An opened ZTEX module.
///
/// The descriptor and configuration block are read once on open and cached.
/// Every operation that touches the device goes through the wrapped
/// [`ControlTransfer`].
pub struct Device<T: ControlTransfer> {
    transport: T,
    descriptor: DeviceDescriptor,
    configuration: DeviceConfiguration,
    convention: StatusConvention,
}

impl<T: ControlTransfer> Device<T> {
    /// Reads the descriptor and configuration block with default options.
    pub fn open(transport: T) -> Result<Self, Error> {
        Self::open_with(transport, DeviceOptions::default())
    }

    pub fn open_with(mut transport: T, options: DeviceOptions) -> Result<Self, Error> {
        let descriptor = ReadDescriptor.execute(&mut transport)?;
        if !descriptor.has_ztex_magic() {
            warn!(
                "Descriptor magic is {}, expected ZTEX",
                descriptor.magic.escape_ascii()
            );
        }

        let configuration = ReadConfiguration.execute(&mut transport)?;
        let convention = options
            .convention
            .unwrap_or_else(|| resolve_convention(descriptor.firmware_version));

        info!(
            "Opened {} (serial {}, firmware {})",
            descriptor.product, descriptor.serial, descriptor.firmware_version
        );
        debug!("Configuration: {configuration}");

        Ok(Self {
            transport,
            descriptor,
            configuration,
            convention,
        })
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    pub fn configuration(&self) -> &DeviceConfiguration {
        &self.configuration
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.descriptor.capabilities
    }

    /// Convention used to interpret FPGA status replies.
    pub fn convention(&self) -> StatusConvention {
        self.convention
    }

    /// Executes a command on this device's transport.
    pub fn execute_command<C: Command>(&mut self, command: C) -> Result<C::Output, Error> {
        command.execute(&mut self.transport)
    }

    pub fn fpga_status(&mut self) -> Result<FpgaStatus, Error> {
        self.execute_command(GetFpgaStatus {
            capabilities: self.capabilities(),
            convention: self.convention,
        })
    }

    pub fn reset_fpga(&mut self) -> Result<(), Error> {
        self.execute_command(ResetFpga {
            capabilities: self.capabilities(),
        })
    }

    /// Resets the FX3 controller. The device re-enumerates afterwards, so
    /// this handle should be dropped.
    pub fn reset_fx3(&mut self) -> Result<(), Error> {
        self.execute_command(ResetFx3 {
            capabilities: self.capabilities(),
        })
    }

    pub fn flash_status(&mut self) -> Result<FlashStatus, Error> {
        self.execute_command(GetFlashStatus {
            capabilities: self.capabilities(),
        })
    }

    pub fn reset_default_firmware(&mut self) -> Result<(), Error> {
        self.execute_command(ResetDefaultFirmware {
            capabilities: self.capabilities(),
        })
    }

    pub fn high_speed_endpoints(&mut self) -> Result<HighSpeedEndpoints, Error> {
        self.execute_command(ReadHighSpeedEndpoints {
            capabilities: self.capabilities(),
        })
    }

    pub fn default_interface_info(&mut self) -> Result<DefaultInterfaceInfo, Error> {
        self.execute_command(ReadDefaultInterfaceInfo {
            capabilities: self.capabilities(),
        })
    }

    /// Re-reads the configuration block, replacing the cached copy only on success.
    pub fn refresh_configuration(&mut self) -> Result<&DeviceConfiguration, Error> {
        self.configuration = self.execute_command(ReadConfiguration)?;
        Ok(&self.configuration)
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}

impl<T: ControlTransfer> fmt::Debug for Device<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("descriptor", &self.descriptor)
            .field("configuration", &self.configuration)
            .field("convention", &self.convention)
            .finish_non_exhaustive()
    }
}

impl<T: ControlTransfer> fmt::Display for Device<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Descriptor({}), {}",
            self.descriptor, self.configuration
        )
    }
}

fn resolve_convention(firmware_version: u8) -> StatusConvention {
    StatusConvention::for_firmware(firmware_version).unwrap_or_else(|| {
        warn!(
            "Unknown firmware version {firmware_version}, assuming the ZTEX SDK status convention"
        );
        StatusConvention::SDK
    })
}
