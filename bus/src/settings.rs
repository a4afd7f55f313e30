//! Runtime configuration of a bus node.
//!
//! Defaults come from the constants `lib/config` generates out of `bus.json`.

use ::config::isapnp;
use core::ops::RangeInclusive;

/// How the declared count of a relations buffer is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountPolicy {
    /// Declare the number of logical devices seen before the walk started, even when the
    /// walk stopped early on a creation failure.
    #[default]
    Planned,
    /// Declare the number of handles actually stored in the buffer.
    Populated,
}

#[derive(Debug, Clone)]
pub struct BusConfig {
    pub count_policy: CountPolicy,
    /// Candidate read-data ports, tried from low to high.
    pub read_ports: RangeInclusive<u16>,
    /// Distance between two candidate read-data ports.
    pub read_port_step: u16,
    /// Largest relations response the bus node will allocate; a longer device list fails the
    /// query with [crate::Status::NoMemory].
    pub max_relations: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        BusConfig {
            count_policy: CountPolicy::default(),
            read_ports: (isapnp::READ_PORT_MIN as u16)..=(isapnp::READ_PORT_MAX as u16),
            read_port_step: isapnp::READ_PORT_STEP as u16,
            max_relations: isapnp::MAX_RELATIONS,
        }
    }
}

impl BusConfig {
    /// Read-data port candidates in the order they are tried.
    pub fn read_port_candidates(&self) -> impl Iterator<Item = u16> + '_ {
        self.read_ports
            .clone()
            .step_by(usize::from(self.read_port_step.max(1)))
    }
}
