//! Attachment state of an event.
//!
//! ```text
//!              0 → 1 (Attach)
//!   Detached ─────────────────► Attached
//!      ▲                           │
//!      └───────────────────────────┘
//!              1 → 0 (Detach)
//! ```
//!
//! Any other listener-count change leaves the state untouched.

/// Whether an event is bound to its name (and subscribed at the transport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attachment {
    /// No listeners; not in the registry.
    #[default]
    Detached,
    /// At least one listener; named events are in the registry.
    Attached,
}

/// Side effect required by a listener-count change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Run the attach protocol.
    Attach,
    /// Run the detach protocol.
    Detach,
}

impl Attachment {
    /// Returns the transition a count change from `before` to `after` triggers.
    pub fn on_count_change(self, before: usize, after: usize) -> Option<Transition> {
        match (self, before, after) {
            (Attachment::Detached, 0, 1) => Some(Transition::Attach),
            (Attachment::Attached, 1, 0) => Some(Transition::Detach),
            _ => None,
        }
    }

    /// State after `transition` completed.
    #[inline]
    pub fn apply(self, transition: Transition) -> Attachment {
        match transition {
            Transition::Attach => Attachment::Attached,
            Transition::Detach => Attachment::Detached,
        }
    }

    #[inline]
    pub fn is_attached(self) -> bool {
        matches!(self, Attachment::Attached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_only_on_zero_to_one() {
        let s = Attachment::Detached;
        assert_eq!(s.on_count_change(0, 1), Some(Transition::Attach));
        assert_eq!(s.on_count_change(1, 2), None);
        assert_eq!(s.on_count_change(2, 1), None);
    }

    #[test]
    fn test_detach_only_on_one_to_zero() {
        let s = Attachment::Attached;
        assert_eq!(s.on_count_change(1, 0), Some(Transition::Detach));
        assert_eq!(s.on_count_change(2, 1), None);
        assert_eq!(s.on_count_change(1, 2), None);
    }

    #[test]
    fn test_no_double_transition() {
        assert_eq!(Attachment::Attached.on_count_change(0, 1), None);
        assert_eq!(Attachment::Detached.on_count_change(1, 0), None);
    }

    #[test]
    fn test_apply() {
        assert!(Attachment::Detached.apply(Transition::Attach).is_attached());
        assert!(!Attachment::Attached.apply(Transition::Detach).is_attached());
    }
}
