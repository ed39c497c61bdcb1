use ztex_protocol::{Capability, CapabilitySet, ControlRequest, FpgaStatus, StatusConvention};

use super::{Command, command, require, transfer};
use crate::{ControlTransfer, Error};

/// Reads the FPGA state.
///
/// The reply is interpreted with an explicit [`StatusConvention`] because
/// firmware revisions disagree on what the "configured" byte means.
#[derive(Debug, Clone, Copy)]
pub struct GetFpgaStatus {
    pub capabilities: CapabilitySet,
    pub convention: StatusConvention,
}

impl Command for GetFpgaStatus {
    type Output = FpgaStatus;

    fn execute<T: ControlTransfer + ?Sized>(self, transport: &mut T) -> Result<FpgaStatus, Error> {
        const OPERATION: &str = "get FPGA state";

        require(&self.capabilities, Capability::FpgaConfiguration, OPERATION)?;
        let response = transfer(transport, ControlRequest::FPGA_STATUS, OPERATION)?;

        Ok(FpgaStatus::decode_with(&response, self.convention)?)
    }
}

/// Resets the FPGA, clearing its configuration.
#[derive(Debug, Clone, Copy)]
pub struct ResetFpga {
    pub capabilities: CapabilitySet,
}

impl Command for ResetFpga {
    type Output = ();

    fn execute<T: ControlTransfer + ?Sized>(self, transport: &mut T) -> Result<(), Error> {
        const OPERATION: &str = "reset FPGA";

        require(&self.capabilities, Capability::FpgaConfiguration, OPERATION)?;
        command(transport, ControlRequest::RESET_FPGA, OPERATION)
    }
}
