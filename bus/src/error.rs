//! Error types produced by the bus node and its collaborators.

use alloc::collections::TryReserveError;
use core::fmt::{Debug, Display, Write};

/// An error that can be printed to a string device
pub trait MessageError: Debug {
    /// Print the error message to a writer
    fn print_to_writer(&self, f: &mut dyn Write) {
        if f.write_fmt(format_args!("{:?}", self)).is_err() {
            let _ = f.write_str("<error message unavailable>");
        }
    }
}

impl Display for dyn MessageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.print_to_writer(f);
        Ok(())
    }
}

// region: Error Types

/// Failures reported by a [crate::hw::HardwareDetector].
///
/// The bus node never retries; the value travels up to the requester untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectError {
    /// No usable read-data port was found in the candidate range.
    NoReadDataPort,
    /// Hardware stopped answering in the middle of an access sequence.
    DeviceNotResponding,
    /// The isolation protocol could not single out a card.
    IsolationFailed,
    /// Custom detector-specific information.
    Customized { info: &'static str },
}

/// The relations buffer could not be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationError {
    /// Number of entries the buffer was planned for.
    pub requested: usize,
}

impl AllocationError {
    pub(crate) fn from_reserve(requested: usize, _err: TryReserveError) -> Self {
        AllocationError { requested }
    }
}

/// A [crate::dev::ChildDevice] could not be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildCreationError {
    /// The object manager ran out of device objects.
    OutOfResources,
    /// Custom factory-specific information.
    Customized { info: &'static str },
}

/// Everything that can go wrong while serving a request on the bus node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    Detect(DetectError),
    Allocation(AllocationError),
    ChildCreation(ChildCreationError),
}

impl From<DetectError> for BusError {
    fn from(value: DetectError) -> Self {
        BusError::Detect(value)
    }
}

impl From<AllocationError> for BusError {
    fn from(value: AllocationError) -> Self {
        BusError::Allocation(value)
    }
}

impl From<ChildCreationError> for BusError {
    fn from(value: ChildCreationError) -> Self {
        BusError::ChildCreation(value)
    }
}

impl MessageError for DetectError {}
impl MessageError for AllocationError {}
impl MessageError for ChildCreationError {}
impl MessageError for BusError {}

// endregion
