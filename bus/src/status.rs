//! Completion status carried by requests.

use crate::error::{BusError, ChildCreationError, DetectError};

/// Final (or current) status of a [crate::Request].
///
/// Every fresh request starts as [Status::NotSupported]: a layer that does not understand
/// the request leaves it that way, a layer that handles it overwrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    Success,
    #[default]
    NotSupported,
    /// Generic failure, typically reported by a lower layer.
    Unsuccessful,
    /// The relations buffer could not be allocated.
    NoMemory,
    /// Hardware detection failed; carries the detector's error verbatim.
    Detect(DetectError),
    /// A child device object could not be created.
    ChildCreation(ChildCreationError),
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }

    pub fn into_result(self) -> Result<(), Status> {
        if self.is_success() { Ok(()) } else { Err(self) }
    }
}

impl From<BusError> for Status {
    fn from(value: BusError) -> Self {
        match value {
            BusError::Detect(err) => Status::Detect(err),
            BusError::Allocation(_) => Status::NoMemory,
            BusError::ChildCreation(err) => Status::ChildCreation(err),
        }
    }
}

impl From<DetectError> for Status {
    fn from(value: DetectError) -> Self {
        Status::Detect(value)
    }
}
