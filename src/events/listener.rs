//! # Listener callback value.
//!
//! [`Listener`] wraps a closure `F: Fn(&[Value]) -> Result<(), ListenerError>` behind an
//! `Arc`, so it can be cloned into an event and later handed back to
//! [`Event::remove_listener`](crate::Event::remove_listener).
//!
//! ## Equality
//! Two listeners are equal when they wrap the **same** closure allocation:
//! - clones of one `Listener` compare equal;
//! - two listeners built from identical closures do not.
//!
//! ## Example
//! ```rust
//! use eventbind::Listener;
//!
//! let a = Listener::from_fn(|args| println!("{args:?}"));
//! let b = a.clone();
//! let c = Listener::from_fn(|args| println!("{args:?}"));
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ListenerError;

type ListenerFn = dyn Fn(&[Value]) -> Result<(), ListenerError> + Send + Sync + 'static;

/// Callback registered on an [`Event`](crate::Event).
#[derive(Clone)]
pub struct Listener {
    f: Arc<ListenerFn>,
}

impl Listener {
    /// Wraps a fallible callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Wraps a callback that cannot fail (other than by panicking).
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        Self::new(move |args| {
            f(args);
            Ok(())
        })
    }

    /// Invokes the callback. Panics are not caught here.
    #[inline]
    pub(crate) fn call(&self, args: &[Value]) -> Result<(), ListenerError> {
        (self.f)(args)
    }

    /// Thin address of the closure allocation (vtable stripped).
    #[inline]
    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.f) as *const ()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener").field(&self.addr()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clone_is_equal() {
        let a = Listener::from_fn(|_| {});
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_closures_are_not_equal() {
        let a = Listener::from_fn(|_| {});
        let b = Listener::from_fn(|_| {});
        assert_ne!(a, b);
    }

    #[test]
    fn test_call_passes_arguments() {
        let l = Listener::new(|args| {
            if args == [json!(1), json!("two")] {
                Ok(())
            } else {
                Err(ListenerError::fail("unexpected args"))
            }
        });
        assert!(l.call(&[json!(1), json!("two")]).is_ok());
        assert_eq!(
            l.call(&[]),
            Err(ListenerError::fail("unexpected args"))
        );
    }
}
