//! Building the bus relations: one child device per logical device, in list order.

use crate::{
    dev::{ChildDevice, DeviceFactory, DeviceFlags, DeviceList, LogicalDevice},
    error::{AllocationError, ChildCreationError},
    settings::{BusConfig, CountPolicy},
};
use alloc::vec::Vec;
use log::warn;
use utils::handle::Handle;

/// Relations response: the children of the bus node, each holding one reference taken for
/// this response.
///
/// [Self::count] is the declared count. It equals `objects().len()` unless the walk stopped on
/// a creation failure under [CountPolicy::Planned].
#[derive(Debug)]
pub struct DeviceRelations {
    count: usize,
    objects: Vec<Handle<ChildDevice>>,
}

impl DeviceRelations {
    /// Room for exactly `count` children. An empty buffer allocates nothing.
    pub fn with_capacity(count: usize) -> Result<DeviceRelations, AllocationError> {
        let mut objects = Vec::new();
        objects
            .try_reserve_exact(count)
            .map_err(|err| AllocationError::from_reserve(count, err))?;
        Ok(DeviceRelations { count, objects })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn objects(&self) -> &[Handle<ChildDevice>] {
        &self.objects
    }

    /// Whether every declared entry is actually present.
    pub fn is_complete(&self) -> bool {
        self.count == self.objects.len()
    }

    /// Give back the references this response holds, as the framework does once it is done.
    pub fn release(self) {
        for child in &self.objects {
            child.dereference();
        }
    }
}

/// Why [enumerate] produced no complete response.
#[derive(Debug)]
pub enum EnumerationError {
    /// Nothing was built.
    Allocation(AllocationError),
    /// The walk stopped at a device whose child could not be created. Children listed in
    /// `relations` were exposed and referenced and stay valid.
    Partial {
        relations: DeviceRelations,
        error: ChildCreationError,
    },
}

/// Expose `logical` as a child device, creating the child only on first use.
pub fn materialize<'a>(
    logical: &'a Handle<LogicalDevice>,
    factory: &dyn DeviceFactory,
) -> Result<&'a Handle<ChildDevice>, ChildCreationError> {
    logical.expose_with(|| {
        let child = factory.create(logical)?;
        child.clear_flags(DeviceFlags::INITIALIZING);
        debug_ex!(
            "\tExposed logical device {}/{:08x}#{} as '{}'.",
            logical.id.vendor,
            logical.id.serial,
            logical.id.function,
            child.name()
        );
        Ok(Handle::from(child))
    })
}

/// Build the relations response for `devices`.
///
/// Must run in the same critical section that refreshed `devices`. Allocation happens once, up
/// front, for the count seen at entry; no entry is added past it. A list longer than
/// [BusConfig::max_relations] fails before anything is allocated or exposed.
pub fn enumerate(
    devices: &DeviceList,
    factory: &dyn DeviceFactory,
    config: &BusConfig,
) -> Result<DeviceRelations, EnumerationError> {
    let planned = devices.count();
    if planned > config.max_relations {
        return Err(EnumerationError::Allocation(AllocationError { requested: planned }));
    }
    let mut relations =
        DeviceRelations::with_capacity(planned).map_err(EnumerationError::Allocation)?;

    for logical in devices.iter() {
        match materialize(logical, factory) {
            Ok(child) => {
                child.reference();
                relations.objects.push(child.clone());
            }
            Err(error) => {
                warn!(
                    "Failed to expose logical device {}/{:08x}#{}: {:?}.",
                    logical.id.vendor, logical.id.serial, logical.id.function, error
                );
                if config.count_policy == CountPolicy::Populated {
                    relations.count = relations.objects.len();
                }
                return Err(EnumerationError::Partial { relations, error });
            }
        }
    }
    Ok(relations)
}
