use super::{ChildDevice, LogicalDeviceId};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU8, Ordering};
use spin::Once;
use utils::{handle::Handle, impl_deref};

/// A function found on the bus by hardware detection.
///
/// The logical device owns its [ChildDevice] once one has been exposed; the child only keeps a
/// weak reference back. The slot is filled at most once and never emptied.
#[derive(Debug)]
pub struct LogicalDevice {
    pub id: LogicalDeviceId,
    csn: AtomicU8,
    child: Once<Handle<ChildDevice>>,
}

impl LogicalDevice {
    pub fn new(id: LogicalDeviceId, csn: u8) -> LogicalDevice {
        LogicalDevice {
            id,
            csn: AtomicU8::new(csn),
            child: Once::new(),
        }
    }

    /// Card select number assigned during the last isolation.
    pub fn csn(&self) -> u8 {
        self.csn.load(Ordering::Relaxed)
    }

    pub fn exposed_child(&self) -> Option<&Handle<ChildDevice>> {
        self.child.get()
    }

    /// Return the exposed child, running `create` first if there is none yet.
    ///
    /// A failed `create` leaves the slot empty so a later call may try again.
    pub(crate) fn expose_with<E>(
        &self,
        create: impl FnOnce() -> Result<Handle<ChildDevice>, E>,
    ) -> Result<&Handle<ChildDevice>, E> {
        self.child.try_call_once(create)
    }
}

/// Ordered list of the logical devices on a bus, in discovery order.
///
/// Lives inside the bus node's spinlock; every method here assumes the caller holds it.
#[derive(Debug, Default)]
pub struct DeviceList {
    inner: Vec<Handle<LogicalDevice>>,
}
impl_deref!(DeviceList, Vec<Handle<LogicalDevice>>);

impl DeviceList {
    pub const fn new() -> DeviceList {
        DeviceList { inner: Vec::new() }
    }

    /// Number of logical devices currently on the list.
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    pub fn find(&self, id: &LogicalDeviceId) -> Option<&Handle<LogicalDevice>> {
        self.inner.iter().find(|dev| dev.id == *id)
    }

    /// Append a newly discovered device and return its handle.
    pub fn push(&mut self, id: LogicalDeviceId, csn: u8) -> Handle<LogicalDevice> {
        let dev = Handle::from(LogicalDevice::new(id, csn));
        self.inner.push(dev.clone());
        dev
    }

    pub fn remove(&mut self, id: &LogicalDeviceId) -> Option<Handle<LogicalDevice>> {
        let index = self.inner.iter().position(|dev| dev.id == *id)?;
        Some(self.inner.remove(index))
    }

    /// Bring the list in line with a fresh detection pass.
    ///
    /// Devices still present keep their position and their exposed child, vanished ones are
    /// dropped, new ones are appended in the order they were found. Duplicate ids in `found`
    /// are ignored after the first.
    pub fn reconcile(&mut self, found: impl IntoIterator<Item = (LogicalDeviceId, u8)>) {
        let mut unique: Vec<(LogicalDeviceId, u8)> = Vec::new();
        for (id, csn) in found {
            if !unique.iter().any(|(seen, _)| *seen == id) {
                unique.push((id, csn));
            }
        }
        let found = unique;
        self.inner
            .retain(|dev| found.iter().any(|(id, _)| *id == dev.id));
        for (id, csn) in found {
            match self.find(&id) {
                Some(dev) => dev.csn.store(csn, Ordering::Relaxed),
                None => {
                    self.push(id, csn);
                }
            }
        }
    }
}
