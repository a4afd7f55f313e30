//! ISA Plug and Play bus node.
//!
//! The crate implements the function-device side of a PnP bus controller: it owns the list of
//! logical devices found on the bus, exposes each of them as a [dev::ChildDevice] on demand and
//! answers the small set of control requests the device framework sends to the bus node
//! (see [fdo::BusNode::dispatch]).
//!
//! Hardware access and the lower device stack are collaborators reached through the
//! [hw::HardwareDetector] and [lower::LowerDevice] traits.
#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(test)]
extern crate quickcheck;

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

#[macro_use]
pub mod logging;
pub mod settings;
pub mod dev;
pub mod error;
pub mod fdo;
pub mod hw;
pub mod lower;
pub mod request;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use fdo::{BusNode, Dispatched};
pub use request::{MinorFunction, RelationKind, Request};
pub use status::Status;
