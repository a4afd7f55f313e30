//! Fixtures shared by the unit tests.

use crate::{
    BusNode,
    dev::{ChildDevice, DefaultFactory, DeviceFactory, LogicalDevice, LogicalDeviceId, PnpId},
    error::ChildCreationError,
    hw::{CardInfo, TableDetector},
    lower::LowerDevice,
    request::Request,
    settings::BusConfig,
    status::Status,
};
use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::sync::atomic::{AtomicUsize, Ordering};
use utils::{handle::Handle, sync::SpinLock};

pub const TEST_VENDOR: PnpId = PnpId::from_compressed(0x3100_8C0E); // CTL0031

pub fn device_id(serial: u32) -> LogicalDeviceId {
    LogicalDeviceId {
        vendor: TEST_VENDOR,
        serial,
        function: 0,
    }
}

pub fn card(serial: u32, functions: u8) -> CardInfo {
    CardInfo {
        vendor: TEST_VENDOR,
        serial,
        functions,
    }
}

/// Creates children until its budget runs out, then fails with
/// [ChildCreationError::OutOfResources].
pub struct FlakyFactory {
    budget: AtomicUsize,
}

impl FlakyFactory {
    pub fn failing_after(successes: usize) -> FlakyFactory {
        FlakyFactory {
            budget: AtomicUsize::new(successes),
        }
    }

    pub fn heal(&self) {
        self.budget.store(usize::MAX, Ordering::SeqCst);
    }
}

impl DeviceFactory for FlakyFactory {
    fn create(&self, logical: &Handle<LogicalDevice>) -> Result<ChildDevice, ChildCreationError> {
        self.budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .map_err(|_| ChildCreationError::OutOfResources)?;
        DefaultFactory.create(logical)
    }
}

impl<T: DeviceFactory + ?Sized> DeviceFactory for Arc<T> {
    fn create(&self, logical: &Handle<LogicalDevice>) -> Result<ChildDevice, ChildCreationError> {
        (**self).create(logical)
    }
}

/// Lower device that records what reaches it and completes forwarded requests with the
/// status they arrive with.
pub struct RecordingLower {
    sync_status: SpinLock<Status>,
    sync_calls: AtomicUsize,
    forwarded: SpinLock<Vec<(u8, Status)>>,
}

impl RecordingLower {
    pub fn new() -> RecordingLower {
        RecordingLower {
            sync_status: SpinLock::new(Status::Success),
            sync_calls: AtomicUsize::new(0),
            forwarded: SpinLock::new(Vec::new()),
        }
    }

    /// Status the lower device completes synchronous forwards with.
    pub fn complete_sync_with(&self, status: Status) {
        *self.sync_status.lock() = status;
    }

    pub fn sync_calls(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }

    /// Minor codes and statuses of the requests forwarded so far.
    pub fn forwarded(&self) -> Vec<(u8, Status)> {
        self.forwarded.lock().clone()
    }
}

impl LowerDevice for RecordingLower {
    fn forward_synchronous(&self, request: &mut Request) -> Status {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        let status = *self.sync_status.lock();
        request.set_status(status);
        status
    }

    fn forward(&self, request: Request) -> Status {
        self.forwarded
            .lock()
            .push((request.minor_code(), request.status()));
        request.status()
    }
}

pub struct Fixture {
    pub bus: Arc<BusNode>,
    pub detector: Arc<TableDetector>,
    pub lower: Arc<RecordingLower>,
}

/// A stopped bus node over a [TableDetector] holding one single-function card per serial.
pub fn fixture(serials: &[u32]) -> Fixture {
    fixture_with(serials, BusConfig::default(), Box::new(DefaultFactory))
}

pub fn fixture_with(serials: &[u32], config: BusConfig, factory: Box<dyn DeviceFactory>) -> Fixture {
    let detector = Arc::new(TableDetector::new(config.clone()));
    for serial in serials {
        detector.insert_card(card(*serial, 1));
    }
    let lower = Arc::new(RecordingLower::new());
    let bus = BusNode::new(config, Box::new(detector.clone()), Box::new(lower.clone()))
        .with_factory(factory);
    Fixture {
        bus: Arc::new(bus),
        detector,
        lower,
    }
}
