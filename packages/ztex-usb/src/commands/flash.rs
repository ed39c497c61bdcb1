use ztex_protocol::{Capability, CapabilitySet, ControlRequest, FlashStatus};

use super::{Command, read, require};
use crate::{ControlTransfer, Error};

/// Reads the flash memory state.
#[derive(Debug, Clone, Copy)]
pub struct GetFlashStatus {
    pub capabilities: CapabilitySet,
}

impl Command for GetFlashStatus {
    type Output = FlashStatus;

    fn execute<T: ControlTransfer + ?Sized>(self, transport: &mut T) -> Result<FlashStatus, Error> {
        const OPERATION: &str = "get flash state";

        require(&self.capabilities, Capability::FlashMemory, OPERATION)?;
        read(transport, ControlRequest::FLASH_STATUS, OPERATION)
    }
}
