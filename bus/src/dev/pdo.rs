use super::{AtomicDeviceState, DeviceState, LogicalDevice};
use crate::error::ChildCreationError;
use alloc::{boxed::Box, format};
use bitflags::bitflags;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use utils::handle::{Handle, HandleRef};

bitflags! {
    /// Device object flags.
    pub struct DeviceFlags: u32 {
        /// The object is still being set up and must not receive requests.
        const INITIALIZING = 0x0000_0080;
    }
}

/// The object a [LogicalDevice] is exposed as to the rest of the device framework.
///
/// Owned by its logical device; [Self::logical_device] only upgrades a weak back-reference.
/// The reference count tracks references handed out in relations responses: the bus node
/// adds one per response that contains the child, the framework drops them with
/// [Self::dereference].
#[derive(Debug)]
pub struct ChildDevice {
    name: Box<str>,
    flags: AtomicU32,
    state: AtomicDeviceState,
    logical: HandleRef<LogicalDevice>,
    references: AtomicUsize,
}

impl ChildDevice {
    /// A stopped, still-initializing child for `logical`.
    pub fn new(name: impl AsRef<str>, logical: &Handle<LogicalDevice>) -> ChildDevice {
        ChildDevice {
            name: Box::from(name.as_ref()),
            flags: AtomicU32::new(DeviceFlags::INITIALIZING.bits()),
            state: AtomicDeviceState::new(DeviceState::Stopped),
            logical: logical.create_ref(),
            references: AtomicUsize::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> DeviceFlags {
        DeviceFlags::from_bits_truncate(self.flags.load(Ordering::Acquire))
    }

    pub fn clear_flags(&self, flags: DeviceFlags) {
        self.flags.fetch_and(!flags.bits(), Ordering::AcqRel);
    }

    pub fn state(&self) -> DeviceState {
        self.state.load()
    }

    /// The logical device this child was created for, if it is still on the bus.
    pub fn logical_device(&self) -> Option<Handle<LogicalDevice>> {
        self.logical.get_handle()
    }

    pub fn is_child_of(&self, logical: &Handle<LogicalDevice>) -> bool {
        self.logical.points_to(logical)
    }

    /// Take one reference; returns the new count.
    pub fn reference(&self) -> usize {
        self.references.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Drop one reference; returns the new count, or [None] if there was none to drop.
    pub fn dereference(&self) -> Option<usize> {
        self.references
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| count.checked_sub(1))
            .ok()
            .map(|old| old - 1)
    }

    pub fn reference_count(&self) -> usize {
        self.references.load(Ordering::Acquire)
    }
}

/// Creates child device objects; the object-manager side of materialization.
///
/// Called with the bus node's spinlock held: implementations must return promptly and must not
/// call back into the bus node.
pub trait DeviceFactory: Send + Sync {
    fn create(&self, logical: &Handle<LogicalDevice>) -> Result<ChildDevice, ChildCreationError>;
}

/// Creates children with auto-generated names (`\Device\NNNNNNNN`).
#[derive(Debug, Default)]
pub struct DefaultFactory;

static NEXT_DEVICE_NUMBER: AtomicU32 = AtomicU32::new(0);

impl DeviceFactory for DefaultFactory {
    fn create(&self, logical: &Handle<LogicalDevice>) -> Result<ChildDevice, ChildCreationError> {
        let number = NEXT_DEVICE_NUMBER.fetch_add(1, Ordering::Relaxed);
        if number == u32::MAX {
            return Err(ChildCreationError::OutOfResources);
        }
        Ok(ChildDevice::new(
            format!("\\Device\\{:08X}", number),
            logical,
        ))
    }
}
