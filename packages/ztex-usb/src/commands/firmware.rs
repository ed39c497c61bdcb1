use ztex_protocol::{
    Capability, CapabilitySet, ControlRequest, DefaultInterfaceInfo, HighSpeedEndpoints,
};

use super::{Command, command, read, require, transfer};
use crate::{ControlTransfer, Error};

/// Resets the Cypress EZ-USB FX3S controller and boots it from flash.
#[derive(Debug, Clone, Copy)]
pub struct ResetFx3 {
    pub capabilities: CapabilitySet,
}

impl Command for ResetFx3 {
    type Output = ();

    fn execute<T: ControlTransfer + ?Sized>(self, transport: &mut T) -> Result<(), Error> {
        const OPERATION: &str = "reset FX3 controller";

        require(&self.capabilities, Capability::Fx3Firmware, OPERATION)?;
        command(transport, ControlRequest::RESET_FX3, OPERATION)
    }
}

/// Resets the default firmware interface.
#[derive(Debug, Clone, Copy)]
pub struct ResetDefaultFirmware {
    pub capabilities: CapabilitySet,
}

impl Command for ResetDefaultFirmware {
    type Output = ();

    fn execute<T: ControlTransfer + ?Sized>(self, transport: &mut T) -> Result<(), Error> {
        const OPERATION: &str = "reset default firmware interface";

        require(&self.capabilities, Capability::DefaultFirmware, OPERATION)?;
        command(transport, ControlRequest::RESET_DEFAULT_FIRMWARE, OPERATION)
    }
}

/// Reads the endpoint used for high-speed FPGA configuration.
#[derive(Debug, Clone, Copy)]
pub struct ReadHighSpeedEndpoints {
    pub capabilities: CapabilitySet,
}

impl Command for ReadHighSpeedEndpoints {
    type Output = HighSpeedEndpoints;

    fn execute<T: ControlTransfer + ?Sized>(
        self,
        transport: &mut T,
    ) -> Result<HighSpeedEndpoints, Error> {
        const OPERATION: &str = "read high speed configuration endpoints";

        require(
            &self.capabilities,
            Capability::HighSpeedFpgaConfiguration,
            OPERATION,
        )?;
        read(transport, ControlRequest::HS_CONFIG_SETTINGS, OPERATION)
    }
}

/// Reads the version and endpoints of the default firmware interface.
#[derive(Debug, Clone, Copy)]
pub struct ReadDefaultInterfaceInfo {
    pub capabilities: CapabilitySet,
}

impl Command for ReadDefaultInterfaceInfo {
    type Output = DefaultInterfaceInfo;

    fn execute<T: ControlTransfer + ?Sized>(
        self,
        transport: &mut T,
    ) -> Result<DefaultInterfaceInfo, Error> {
        const OPERATION: &str = "read default interface information";

        require(&self.capabilities, Capability::DefaultFirmware, OPERATION)?;
        let response = transfer(transport, ControlRequest::DEFAULT_INTERFACE_INFO, OPERATION)?;

        Ok(DefaultInterfaceInfo::decode_response(&response)?)
    }
}
