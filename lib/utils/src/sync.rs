//! Bounded-duration mutual exclusion.
//!
//! [SpinLock] never parks the caller, so it may be taken from interrupt-level paths as well
//! as from ordinary request handlers. The price is on the holder:
//! - Critical sections must be short and bounded. No unbounded waits while holding the lock.
//! - The lock is not reentrant. Acquiring it again on the same path spins forever.
//! - Allocations inside the section must be small and bounded. A buffer sized by outside input
//!   is reserved fallibly (`try_reserve`) against a configured cap, so running out is reported
//!   to the caller instead of aborting.
use core::{
    fmt::Debug,
    ops::{Deref, DerefMut},
};

use spin::{MutexGuard, Spin, mutex::Mutex};

pub struct SpinLock<T: ?Sized> {
    inner: Mutex<T, Spin>,
}

impl<T> SpinLock<T> {
    pub const fn new(value: T) -> SpinLock<T> {
        SpinLock {
            inner: Mutex::new(value),
        }
    }
}

impl<T: ?Sized> SpinLock<T> {
    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        SpinLockGuard {
            inner: self.inner.lock(),
        }
    }

    /// Take the lock only if nobody holds it right now.
    pub fn try_lock(&self) -> Option<SpinLockGuard<'_, T>> {
        self.inner.try_lock().map(|inner| SpinLockGuard { inner })
    }

    /// Racy by nature; meant for assertions only.
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }
}

impl<T: ?Sized + Debug> Debug for SpinLock<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.inner.try_lock() {
            Some(guard) => f.debug_struct("SpinLock").field("data", &&*guard).finish(),
            None => f.write_str("SpinLock { <locked> }"),
        }
    }
}

// region: Guard

pub struct SpinLockGuard<'a, T: ?Sized> {
    inner: MutexGuard<'a, T>,
}

impl<T: ?Sized> Deref for SpinLockGuard<'_, T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: ?Sized> DerefMut for SpinLockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

// endregion
