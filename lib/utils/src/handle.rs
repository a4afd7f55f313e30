//! Lightweight handle types for shared ownership and weak back-references.
//!
//! Provide two complementary handle types:
//! - [Handle<T>] owns a strong reference to an object using [alloc::sync::Arc]. Use it where
//!   shared, long-lived ownership is required (for example device objects owned by a bus).
//!   There should be only one long-lived [Handle<T>] keeping the lifecycle,
//!   and other instances fetched by calling [HandleRef<T>::get_handle()] should be temporary.
//! - [HandleRef<T>] stores a weak reference ([alloc::sync::Weak]) and is suitable for
//!   back-pointers that must not keep the target alive.
//!
//! Key guarantees and semantics:
//! - Call [Handle::create_ref] to derive a [HandleRef] from an existing strong [Handle].
//! - Call [HandleRef::get_handle] to attempt an upgrade; it returns [None] if the strong owner(s)
//!   have dropped the object. **Consumers must handle the [None] case explicitly.**
//! - Identity is pointer identity: [Handle::ptr_eq] and [HandleRef::points_to] never compare
//!   the payloads.
use alloc::{sync::Arc, sync::Weak};
use core::{fmt::Debug, ops::Deref};

/// Strong owning handle backed by [Arc<T>].
///
/// The inner value is reference-counted; cloning the handle increments the count.
/// Use [Handle<T>::create_ref] to produce a weak [HandleRef<T>] suitable for back-references.
pub struct Handle<T: ?Sized> {
    inner: Arc<T>,
}

impl<T: ?Sized> Deref for Handle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> From<T> for Handle<T> {
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized + Debug> Debug for Handle<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.inner.fmt(f)
    }
}

impl<T: ?Sized> Handle<T> {
    /// Create a non-owning [HandleRef<T>] that refers to the same underlying object.
    ///
    /// The returned [HandleRef<T>] does not increment the strong reference count and
    /// must be upgraded with [HandleRef::get_handle] before use.
    pub fn create_ref(&self) -> HandleRef<T> {
        HandleRef {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Whether both handles point at the same object.
    pub fn ptr_eq(&self, other: &Handle<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Weak (non-owning) handle backed by [Weak<T>].
///
/// A [HandleRef<T>] represents an optional reference to an object which may be destroyed
/// independently of the referrers. Use [HandleRef<T>::get_handle] to attempt to obtain a strong [Handle<T>].
pub struct HandleRef<T: ?Sized> {
    inner: Weak<T>,
}

impl<T: ?Sized> Clone for HandleRef<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> Debug for HandleRef<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandleRef")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<T: ?Sized> HandleRef<T> {
    /// Attempt to upgrade the weak reference into a strong [Handle<T>].
    ///
    /// Return `Some(Handle<T>)` if the target is still alive, otherwise return `None`.
    /// **Always check the result** before dereferencing the returned handle.
    pub fn get_handle(&self) -> Option<Handle<T>> {
        Weak::upgrade(&self.inner).map(|inner| Handle { inner })
    }

    /// Whether this reference was derived from `handle`. Works even after the target died.
    pub fn points_to(&self, handle: &Handle<T>) -> bool {
        core::ptr::addr_eq(self.inner.as_ptr(), Arc::as_ptr(&handle.inner))
    }
}
