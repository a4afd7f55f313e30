//! Hardware detection seam.
//!
//! The bus node never touches I/O ports itself. It calls a [HardwareDetector] with its spinlock
//! held and lets it update the guarded [BusContext].

mod table;
pub use table::*;

use crate::{error::DetectError, fdo::BusContext};
use alloc::sync::Arc;

/// Detection collaborator of a bus node.
///
/// Both calls run inside the bus node's critical section: they may be slow, but must be bounded,
/// must not block indefinitely and must not call back into the bus node.
pub trait HardwareDetector: Send + Sync {
    /// Locate the read-data port used to talk to the cards and record it in `bus`.
    fn detect_read_data_port(&self, bus: &mut BusContext) -> Result<(), DetectError>;

    /// Re-run isolation and bring `bus.devices` up to date.
    fn fill_device_list(&self, bus: &mut BusContext) -> Result<(), DetectError>;
}

impl<T: HardwareDetector + ?Sized> HardwareDetector for Arc<T> {
    fn detect_read_data_port(&self, bus: &mut BusContext) -> Result<(), DetectError> {
        (**self).detect_read_data_port(bus)
    }

    fn fill_device_list(&self, bus: &mut BusContext) -> Result<(), DetectError> {
        (**self).fill_device_list(bus)
    }
}
