//! # Registry: name → attached event lookup table.
//!
//! The registry maps each bound name to the single [`Event`] currently attached
//! under it. It is used by the attach/detach protocol and by inbound dispatch-by-name.
//!
//! ## Architecture
//! ```text
//! Event::add_listener (0 → 1)     ─► try_insert(name, event) ─► DuplicateName if taken
//! Event::remove_listener (1 → 0)  ─► remove_if_bound(name, event) ─► NotAttached if false
//! Hub::notify_by_name(name, ..)   ─► lookup(name) ─► Event::dispatch(args)
//! ```
//!
//! ## Rules
//! - Entries are **non-owning** (`Weak`): the registry never keeps an event alive.
//! - The registry never creates events or touches their listeners.
//! - `insert`/`remove` do not check the one-owner-per-name invariant themselves;
//!   the event's attach/detach protocol guards it.
//! - Anonymous events are never inserted.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::events::{Event, EventInner};

/// Name → attached event table.
#[derive(Default)]
pub struct Registry {
    entries: Mutex<HashMap<Arc<str>, Weak<EventInner>>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the event attached under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<Event> {
        let entries = self.entries.lock();
        entries
            .get(name)
            .and_then(Weak::upgrade)
            .map(Event::from_inner)
    }

    /// Binds `name` to `event`, replacing any previous entry.
    ///
    /// Callers must have checked that the name is free.
    pub fn insert(&self, name: &str, event: &Event) {
        self.entries.lock().insert(Arc::from(name), event.downgrade());
    }

    /// Unbinds `name`. Returns whether an entry was present.
    pub fn remove(&self, name: &str) -> bool {
        self.entries.lock().remove(name).is_some()
    }

    /// True if a live event is bound to `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .lock()
            .get(name)
            .is_some_and(|w| w.strong_count() > 0)
    }

    /// Returns sorted list of bound names.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let entries = self.entries.lock();
        let mut names: Vec<String> = entries
            .iter()
            .filter(|(_, w)| w.strong_count() > 0)
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort_unstable();
        names
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .values()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// True if no name is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Binds `name` to `event` unless a live event already holds it.
    /// Returns whether the binding was made.
    pub(crate) fn try_insert(&self, name: &str, event: &Event) -> bool {
        let mut entries = self.entries.lock();
        if entries.get(name).is_some_and(|w| w.strong_count() > 0) {
            return false;
        }
        entries.insert(Arc::from(name), event.downgrade());
        true
    }

    /// Unbinds `name` only if it is bound to `target`. Returns whether it was.
    ///
    /// Compares by address, so it also works while `target` is being dropped.
    pub(crate) fn remove_if_bound(&self, name: &str, target: &EventInner) -> bool {
        let mut entries = self.entries.lock();
        let bound = entries
            .get(name)
            .is_some_and(|w| std::ptr::eq(w.as_ptr(), target));
        if bound {
            entries.remove(name);
        }
        bound
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Config, Hub, Listener};

    #[test]
    fn test_lookup_insert_remove() {
        let hub = Hub::new(Config::default());
        let registry = hub.registry();
        let ev = hub.named("manual");

        assert!(registry.lookup("manual").is_none());
        registry.insert("manual", &ev);
        assert_eq!(registry.lookup("manual"), Some(ev.clone()));
        assert!(registry.contains("manual"));
        assert_eq!(registry.len(), 1);

        assert!(registry.remove("manual"));
        assert!(!registry.remove("manual"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_names_sorted() {
        let hub = Hub::new(Config::default());
        let b = hub.named("b");
        let a = hub.named("a");
        b.add_listener(Listener::from_fn(|_| {})).unwrap();
        a.add_listener(Listener::from_fn(|_| {})).unwrap();

        assert_eq!(hub.registry().names(), vec!["a", "b"]);
    }

    #[test]
    fn test_does_not_keep_events_alive() {
        let hub = Hub::new(Config::default());
        {
            let ev = hub.named("weak");
            hub.registry().insert("weak", &ev);
        }
        // a dropped, never-attached event leaves a dead entry behind
        assert!(hub.registry().lookup("weak").is_none());
        assert!(!hub.registry().contains("weak"));
        assert!(hub.registry().is_empty());
    }

    #[test]
    fn test_detach_leaves_foreign_binding_alone() {
        let hub = Hub::new(Config::default());
        let owner = hub.named("n");
        let intruder = hub.named("n");
        let l = Listener::from_fn(|_| {});
        owner.add_listener(l.clone()).unwrap();

        // rebind behind the owner's back
        hub.registry().insert("n", &intruder);

        assert!(owner.remove_listener(&l).is_err());
        assert_eq!(hub.registry().lookup("n"), Some(intruder.clone()));
    }
}
