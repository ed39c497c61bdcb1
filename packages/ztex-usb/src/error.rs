use thiserror::Error;
use ztex_protocol::{Capability, DecodeError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Response decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("{operation} is not supported: the device does not advertise {capability}")]
    UnsupportedOperation {
        operation: &'static str,
        capability: Capability,
    },

    #[error("{operation}: got {found} bytes, want {expected} bytes")]
    UnexpectedResponseLength {
        operation: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Control transfer failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }

    /// Returns `true` if the device refused the operation before any transfer was made.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }
}
