//! Helper macros for thin wrapper types holding their payload in an `inner` field.

/// Implement [core::ops::Deref] for a wrapper whose payload lives in `inner`.
///
/// Only shared access is exposed; wrappers that need to guard mutation keep
/// their own `&mut self` methods.
#[macro_export]
macro_rules! impl_deref {
    ($name: ty, $type: ty) => {
        impl core::ops::Deref for $name {
            type Target = $type;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }
    };
}
