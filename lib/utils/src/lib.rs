#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
pub mod macros;
pub mod handle;
pub mod sync;
