use std::sync::{Arc, Mutex, Weak};

use crate::common::Subscription;
use crate::common::registry::Registry;

/// How far an event travels when dispatched.
///
/// Containment is modeled as an explicit delivery scope rather than a
/// host tree-traversal mechanism: `Local` delivery stops at the scope the
/// event was dispatched on, `Bubble` delivery continues up the parent
/// chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Deliver to listeners of this scope only
    Local,

    /// Deliver to this scope, then to every ancestor scope
    Bubble,
}

struct ScopeInner<E> {
    listeners: Registry<E>,
    parent: Mutex<Option<Weak<ScopeInner<E>>>>,
}

/// A listener registry with optional parent chaining.
///
/// Each player owns one scope as its boundary; a host may attach it to an
/// ancestor scope to model containment. Cloning yields another handle to
/// the same scope.
pub struct EventScope<E: Send + 'static> {
    inner: Arc<ScopeInner<E>>,
}

impl<E: Send + 'static> EventScope<E> {
    /// Create a detached scope with no listeners.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                listeners: Registry::new(),
                parent: Mutex::new(None),
            }),
        }
    }

    /// Register a listener invoked for every event delivered to this scope.
    ///
    /// Listeners run synchronously in insertion order. The listener stays
    /// registered while the returned [`Subscription`] is alive.
    pub fn listen(&self, callback: impl FnMut(&E) + Send + 'static) -> Subscription {
        self.inner.listeners.add(callback)
    }

    /// Attach this scope below `parent` for bubbled delivery.
    ///
    /// Replaces any previous parent. Only a weak link is kept, so a parent
    /// dropped by the host simply stops receiving bubbled events.
    pub fn attach_to(&self, parent: &EventScope<E>) {
        if let Ok(mut slot) = self.inner.parent.lock() {
            *slot = Some(Arc::downgrade(&parent.inner));
        }
    }

    /// Detach this scope from its parent, if any.
    pub fn detach(&self) {
        if let Ok(mut slot) = self.inner.parent.lock() {
            *slot = None;
        }
    }

    /// Deliver an event to this scope's listeners.
    ///
    /// With [`Propagation::Bubble`] the event is then re-delivered to each
    /// ancestor scope in order. Delivery is fully synchronous.
    pub fn dispatch(&self, event: &E, propagation: Propagation) {
        self.inner.listeners.notify(event);

        if propagation == Propagation::Bubble
            && let Some(parent) = self.parent()
        {
            parent.dispatch(event, Propagation::Bubble);
        }
    }

    fn parent(&self) -> Option<EventScope<E>> {
        let slot = self.inner.parent.lock().ok()?;
        let parent = slot.as_ref()?.upgrade()?;
        Some(EventScope { inner: parent })
    }
}

impl<E: Send + 'static> Clone for EventScope<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Send + 'static> Default for EventScope<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Send + 'static> std::fmt::Debug for EventScope<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventScope").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::{Arc, Mutex};

    use super::*;

    fn recorder(scope: &EventScope<&'static str>) -> (Arc<Mutex<Vec<&'static str>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = scope.listen(move |event: &&'static str| {
            sink.lock().unwrap().push(*event);
        });
        (seen, subscription)
    }

    #[test]
    fn local_dispatch_reaches_own_listeners_only() {
        let parent = EventScope::new();
        let child = EventScope::new();
        child.attach_to(&parent);

        let (child_seen, _child_sub) = recorder(&child);
        let (parent_seen, _parent_sub) = recorder(&parent);

        child.dispatch(&"contained", Propagation::Local);

        assert_eq!(*child_seen.lock().unwrap(), vec!["contained"]);
        assert!(parent_seen.lock().unwrap().is_empty());
    }

    #[test]
    fn bubbled_dispatch_walks_the_parent_chain() {
        let grandparent = EventScope::new();
        let parent = EventScope::new();
        let child = EventScope::new();
        parent.attach_to(&grandparent);
        child.attach_to(&parent);

        let (parent_seen, _a) = recorder(&parent);
        let (grandparent_seen, _b) = recorder(&grandparent);

        child.dispatch(&"bubbled", Propagation::Bubble);

        assert_eq!(*parent_seen.lock().unwrap(), vec!["bubbled"]);
        assert_eq!(*grandparent_seen.lock().unwrap(), vec!["bubbled"]);
    }

    #[test]
    fn detach_stops_bubbled_delivery() {
        let parent = EventScope::new();
        let child = EventScope::new();
        child.attach_to(&parent);

        let (parent_seen, _sub) = recorder(&parent);

        child.detach();
        child.dispatch(&"orphaned", Propagation::Bubble);

        assert!(parent_seen.lock().unwrap().is_empty());
    }

    #[test]
    fn dropped_parent_is_skipped() {
        let child = EventScope::new();
        {
            let parent: EventScope<&'static str> = EventScope::new();
            child.attach_to(&parent);
        }

        // Must not panic or deliver anywhere.
        child.dispatch(&"noop", Propagation::Bubble);
    }
}
