//! Devices living on the bus: the logical devices found by detection and the child device
//! objects exposed for them.

mod id;
pub use id::*;
mod logical;
pub use logical::*;
mod pdo;
pub use pdo::*;

use core::sync::atomic::{AtomicU8, Ordering};
use num_enum::{FromPrimitive, IntoPrimitive};

/// Lifecycle of a device node, shared by the bus node and its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DeviceState {
    #[num_enum(default)]
    Stopped = 0,
    Started = 1,
}

/// A [DeviceState] that can be read and written without a lock.
///
/// Writes are not ordered against the bus node's device list; readers may see a state change
/// before or after a concurrent enumeration.
#[derive(Debug)]
pub struct AtomicDeviceState {
    inner: AtomicU8,
}

impl AtomicDeviceState {
    pub const fn new(state: DeviceState) -> AtomicDeviceState {
        AtomicDeviceState {
            inner: AtomicU8::new(state as u8),
        }
    }

    pub fn load(&self) -> DeviceState {
        DeviceState::from(self.inner.load(Ordering::Acquire))
    }

    pub fn store(&self, state: DeviceState) {
        self.inner.store(state.into(), Ordering::Release);
    }
}
