//! The bus node itself (the function device object of the bus).
//!
//! Ownership and concurrency notes:
//! - [BusContext] (device list, detected read-data port) lives behind one [SpinLock]. Every read
//!   or write of it, including the calls into the [HardwareDetector], happens with the lock held.
//! - The bus node's own [DeviceState] is an atomic written without the lock, so a Stop may
//!   overlap an enumeration that is already running.
//! - Requests are handled synchronously on the caller's thread; nothing here parks a thread.

mod dispatch;
pub use dispatch::*;
mod relations;
pub use relations::*;

use crate::{
    dev::{AtomicDeviceState, DefaultFactory, DeviceFactory, DeviceList, DeviceState},
    hw::HardwareDetector,
    lower::LowerDevice,
    settings::BusConfig,
};
use alloc::boxed::Box;
use utils::sync::SpinLock;

/// Bus data guarded by the bus node's spinlock.
#[derive(Debug, Default)]
pub struct BusContext {
    /// Read-data port found by the last successful detection.
    pub read_data_port: Option<u16>,
    pub devices: DeviceList,
}

pub struct BusNode {
    config: BusConfig,
    state: AtomicDeviceState,
    context: SpinLock<BusContext>,
    detector: Box<dyn HardwareDetector>,
    factory: Box<dyn DeviceFactory>,
    lower: Box<dyn LowerDevice>,
}

impl BusNode {
    /// A stopped bus node with an empty device list, sitting on top of `lower`.
    pub fn new(
        config: BusConfig,
        detector: Box<dyn HardwareDetector>,
        lower: Box<dyn LowerDevice>,
    ) -> BusNode {
        BusNode {
            config,
            state: AtomicDeviceState::new(DeviceState::Stopped),
            context: SpinLock::new(BusContext::default()),
            detector,
            factory: Box::new(DefaultFactory),
            lower,
        }
    }

    /// Replace the factory used to create child devices.
    pub fn with_factory(mut self, factory: Box<dyn DeviceFactory>) -> BusNode {
        self.factory = factory;
        self
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    pub fn state(&self) -> DeviceState {
        self.state.load()
    }

    pub fn read_data_port(&self) -> Option<u16> {
        self.context.lock().read_data_port
    }

    pub fn device_count(&self) -> usize {
        self.context.lock().devices.count()
    }

    /// Run `f` inside the bus node's critical section.
    ///
    /// This is the entry for interrupt-level callbacks that update the device list outside of
    /// request handling. `f` must be short and must not call back into this bus node.
    pub fn with_context<R>(&self, f: impl FnOnce(&mut BusContext) -> R) -> R {
        f(&mut self.context.lock())
    }
}

impl core::fmt::Debug for BusNode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BusNode")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
