//! The next lower layer of the device stack.

use crate::{request::Request, status::Status};
use alloc::sync::Arc;

/// Link to the device object the bus node is attached on top of.
pub trait LowerDevice: Send + Sync {
    /// Send `request` down and wait until the lower layer completed it.
    ///
    /// The request stays with the caller, carrying whatever status the lower layer set.
    fn forward_synchronous(&self, request: &mut Request) -> Status;

    /// Hand `request` down without waiting; the lower layer owns it from now on.
    fn forward(&self, request: Request) -> Status;
}

impl<T: LowerDevice + ?Sized> LowerDevice for Arc<T> {
    fn forward_synchronous(&self, request: &mut Request) -> Status {
        (**self).forward_synchronous(request)
    }

    fn forward(&self, request: Request) -> Status {
        (**self).forward(request)
    }
}
