//! Configurations for the bus driver.
//! The constants are generated by `build.rs` from `bus.json` at the workspace root.

#![no_std]
#![deny(missing_docs)]

include!(concat!(env!("OUT_DIR"), "/build_flags.rs"));
